//! Services commands

use serde::Serialize;
use tabled::Tabled;

use agency_forms::{FormSchemaRegistry, Locale};

use crate::{output::OutputFormat, ServiceCommands};

#[derive(Debug, Serialize, Tabled)]
pub struct ServiceRow {
    pub id: String,
    pub name: String,
    pub steps: usize,
    pub fields: usize,
}

pub fn rows(registry: &FormSchemaRegistry, locale: Locale) -> Vec<ServiceRow> {
    registry
        .schemas()
        .map(|schema| ServiceRow {
            id: schema.category.to_string(),
            name: schema.service_name.get(locale).to_string(),
            steps: schema.section_count(),
            fields: schema.fields().count(),
        })
        .collect()
}

pub fn handle(action: ServiceCommands, format: OutputFormat, locale: Locale) -> anyhow::Result<()> {
    match action {
        ServiceCommands::List => format.print(&rows(FormSchemaRegistry::global(), locale)),
    }
}
