//! Example: Archiving a directory with dirzip-core
//!
//! Run with: `cargo run --example create_archive`

use dirzip_core::create_zip;
use dirzip_core::creation::ArchiveCreator;
use dirzip_core::creation::CreationConfig;
use dirzip_core::creation::IgnoreSet;
use dirzip_core::rename_and_archive;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Build a small tree for the example
    std::fs::create_dir_all("example_site/assets")?;
    std::fs::create_dir_all("example_site/cache")?;
    std::fs::write("example_site/index.html", "<h1>Hello, dirzip!</h1>")?;
    std::fs::write("example_site/assets/app.js", "console.log('hi');")?;
    std::fs::write("example_site/cache/tmp.bin", [0u8; 64])?;

    // Example 1: Function API with an ignore set
    println!("Example 1: Ignore the cache directory");
    let config = CreationConfig::default().with_ignore(IgnoreSet::new(["cache"]));
    let report = create_zip("example.zip", "example_site", &config)?;
    println!("  Archived {} files", report.files_added);
    println!(
        "  Compression ratio: {:.1}%",
        report.compression_percentage()
    );
    std::fs::remove_file("example.zip")?;

    // Example 2: Builder with a wrapper folder
    println!("\nExample 2: Builder pattern");
    let report = ArchiveCreator::new()
        .output("example.zip")
        .source("example_site")
        .windows_style(true)
        .compression_level(9)
        .create()?;
    println!("  Archived {} files under example_site/", report.files_added);
    std::fs::remove_file("example.zip")?;

    // Example 3: Archive under a different top-level name
    println!("\nExample 3: Rename, archive, restore");
    let config = CreationConfig::default().with_windows_style(true);
    let outcome = rename_and_archive(
        "example_site",
        "release",
        ".",
        &config,
        &mut dirzip_core::NoopProgress,
    )?;
    println!("  Wrote {}", outcome.output.display());
    std::fs::remove_file(&outcome.output)?;

    std::fs::remove_dir_all("example_site")?;
    println!("\nExamples completed successfully!");
    Ok(())
}
