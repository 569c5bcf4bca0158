//! Sprite preparation CLI binary
//!
//! Thin wrapper around the library's CLI module.

fn main() -> anyhow::Result<()> {
    spriteprep::cli::main()
}
