//! Common test utilities and helpers

#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use love_sandwiches::config::{ENV_OVERRIDES, ENV_PREFIX};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const HEADER: &str = "bacon,chicken,egg,ham,tuna,turkey\n";

/// Test context builder for setting up a data directory
pub struct TestContextBuilder {
    temp_dir: TempDir,
    with_worksheets: bool,
    stock_rows: Vec<[i64; 6]>,
    sales_rows: Vec<[i64; 6]>,
    initial_files: Vec<(PathBuf, String)>,
}

impl TestContextBuilder {
    /// Create a new test context builder
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
            with_worksheets: false,
            stock_rows: Vec::new(),
            sales_rows: Vec::new(),
            initial_files: Vec::new(),
        })
    }

    /// Create sales, surplus and stock worksheets with headers
    pub fn with_worksheets(mut self) -> Self {
        self.with_worksheets = true;
        self
    }

    /// Add a row to the stock worksheet
    pub fn with_stock(mut self, row: [i64; 6]) -> Self {
        self.with_worksheets = true;
        self.stock_rows.push(row);
        self
    }

    /// Add a row to the sales worksheet
    pub fn with_sales(mut self, row: [i64; 6]) -> Self {
        self.with_worksheets = true;
        self.sales_rows.push(row);
        self
    }

    /// Add an initial file
    pub fn with_file(mut self, path: impl AsRef<Path>, content: &str) -> Self {
        self.initial_files
            .push((path.as_ref().to_path_buf(), content.to_string()));
        self
    }

    /// Build the test context
    pub fn build(self) -> Result<TestContext> {
        let data_dir = self.temp_dir.path().join("data");
        fs::create_dir_all(&data_dir)?;

        if self.with_worksheets {
            fs::write(data_dir.join("sales.csv"), with_rows(&self.sales_rows))?;
            fs::write(data_dir.join("surplus.csv"), HEADER)?;
            fs::write(data_dir.join("stock.csv"), with_rows(&self.stock_rows))?;
        }

        for (file_path, content) in self.initial_files {
            let full_path = self.temp_dir.path().join(file_path);
            if let Some(parent) = full_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(full_path, content)?;
        }

        Ok(TestContext {
            temp_dir: self.temp_dir,
        })
    }
}

fn with_rows(rows: &[[i64; 6]]) -> String {
    let mut content = String::from(HEADER);
    for row in rows {
        let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
        content.push_str(&cells.join(","));
        content.push('\n');
    }
    content
}

/// Test context that manages temporary directories and cleanup
pub struct TestContext {
    temp_dir: TempDir,
}

impl TestContext {
    /// Get the path to the test directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Directory holding the CSV worksheets
    pub fn data_dir(&self) -> PathBuf {
        self.temp_dir.path().join("data")
    }

    /// Read a worksheet file
    pub fn read_worksheet(&self, name: &str) -> Result<String> {
        Ok(fs::read_to_string(
            self.data_dir().join(format!("{}.csv", name)),
        )?)
    }

    /// Data rows of a worksheet, header skipped
    pub fn worksheet_rows(&self, name: &str) -> Result<Vec<String>> {
        Ok(self
            .read_worksheet(name)?
            .lines()
            .skip(1)
            .map(str::to_string)
            .collect())
    }

    /// The binary, isolated from the user's config and environment
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("love-sandwiches").unwrap();
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".config"))
            .env_remove("RUST_LOG");
        for name in ENV_OVERRIDES {
            cmd.env_remove(format!("{}{}", ENV_PREFIX, name));
        }
        cmd
    }

    /// The binary pointed at this context's data directory
    pub fn command_with_data(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("--data-dir").arg(self.data_dir());
        cmd
    }
}
