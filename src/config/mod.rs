pub mod cli;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_distinct_files, validate_file_extension, validate_path, Validate,
};
use clap::Parser;

/// 固定的輸入檔案，會被就地覆寫。
pub const INPUT_FILE: &str = "points.json";

/// 固定的備份檔案，內容與輸入檔完全相同。
pub const BACKUP_FILE: &str = "points_with_colors.json";

/// 資料檔所在目錄（相對於工作目錄）。
pub const DATA_DIR: &str = ".";

#[derive(Debug, Clone, Parser)]
#[command(name = "points-etl")]
#[command(about = "Adds a fixed colour to every record in points.json")]
pub struct CliConfig {
    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log per-phase system stats")]
    pub monitor: bool,
}

impl ConfigProvider for CliConfig {
    fn data_dir(&self) -> &str {
        DATA_DIR
    }

    fn input_file(&self) -> &str {
        INPUT_FILE
    }

    fn backup_file(&self) -> &str {
        BACKUP_FILE
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("data_dir", self.data_dir())?;
        validate_path("input_file", self.input_file())?;
        validate_path("backup_file", self.backup_file())?;
        validate_file_extension("input_file", self.input_file(), &["json"])?;
        validate_file_extension("backup_file", self.backup_file(), &["json"])?;
        validate_distinct_files("backup_file", self.input_file(), self.backup_file())?;
        Ok(())
    }
}
