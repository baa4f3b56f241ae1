//! Output formatting

use clap::ValueEnum;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Print rows as a table, or the serialized rows for json/yaml
    pub fn print<T: Serialize + Tabled>(&self, rows: &[T]) -> anyhow::Result<()> {
        match self {
            OutputFormat::Table => println!("{}", render_table(rows)),
            _ => self.print_value(rows)?,
        }
        Ok(())
    }

    /// Print a document that has no tabular form; tables fall back to json
    pub fn print_value<T: Serialize + ?Sized>(&self, data: &T) -> anyhow::Result<()> {
        match self {
            OutputFormat::Yaml => print!("{}", serde_yaml::to_string(data)?),
            OutputFormat::Json | OutputFormat::Table => {
                println!("{}", serde_json::to_string_pretty(data)?)
            }
        }
        Ok(())
    }
}

pub fn render_table<T: Tabled>(rows: &[T]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}
