//! Build script for wfblock
//!
//! Embeds build-time information (git commit, dirty status, build timestamp)
//! used by the `--version` output.

fn main() {
    // Embed git commit, build time, and dirty status
    shadow_rs::ShadowBuilder::builder()
        .build()
        .expect("Failed to generate build info");
}
