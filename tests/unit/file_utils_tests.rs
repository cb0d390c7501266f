/*!
 * Tests for file utility functionality
 */

use std::path::Path;
use anyhow::Result;
use yasea::file_utils::{FileManager, FileType};
use crate::common;

/// Test output path generation for the result table
#[test]
fn test_generate_output_path_withSubtitleInput_shouldAppendSuffixAndExtension() {
    let output = FileManager::generate_output_path(
        Path::new("/media/movie.srt"),
        Path::new("/media"),
        "emotions",
        "csv",
    );

    assert_eq!(output, Path::new("/media/movie.emotions.csv"));
}

/// Test file type detection by extension
#[test]
fn test_detect_file_type_withKnownExtensions_shouldUseExtension() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    let srt = common::create_test_file(&dir, "movie.srt", "anything")?;
    let csv = common::create_test_file(&dir, "movie.csv", "anything")?;

    assert_eq!(FileManager::detect_file_type(&srt)?, FileType::Subtitle);
    assert_eq!(FileManager::detect_file_type(&csv)?, FileType::Table);
    Ok(())
}

/// Test subtitle detection by content sniffing
#[test]
fn test_detect_file_type_withSrtContent_shouldSniffSubtitle() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    let content = "1\n00:00:01,000 --> 00:00:02,000\nHello.\n";
    let path = common::create_test_file(&dir, "mystery.txt", content)?;

    assert_eq!(FileManager::detect_file_type(&path)?, FileType::Subtitle);
    Ok(())
}

/// Test record table detection by header sniffing
#[test]
fn test_detect_file_type_withTableHeader_shouldSniffTable() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    let content = "time,line,emotion,score\n1.0,Hello.,joy,0.9\n";
    let path = common::create_test_file(&dir, "mystery.txt", content)?;

    assert_eq!(FileManager::detect_file_type(&path)?, FileType::Table);
    Ok(())
}

/// Test unknown content detection
#[test]
fn test_detect_file_type_withPlainText_shouldBeUnknown() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    let path = common::create_test_file(&dir, "notes.txt", "just some notes")?;

    assert_eq!(FileManager::detect_file_type(&path)?, FileType::Unknown);
    Ok(())
}

/// Test that detection of a missing file fails
#[test]
fn test_detect_file_type_withMissingFile_shouldFail() {
    assert!(FileManager::detect_file_type("no/such/file.bin").is_err());
}

/// Test finding subtitle files in a directory tree
#[test]
fn test_find_files_withNestedSubtitles_shouldFindAllByExtension() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    common::create_test_subtitle(&dir, "a.srt")?;
    FileManager::ensure_dir(dir.join("nested"))?;
    common::create_test_subtitle(&dir.join("nested"), "b.srt")?;
    common::create_test_file(&dir, "c.txt", "not a subtitle")?;

    let found = FileManager::find_files(&dir, "srt")?;

    assert_eq!(found.len(), 2);
    Ok(())
}
