//! Schema commands

use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use agency_forms::{FieldDefinition, FormSchema, FormSchemaRegistry, Locale, ServiceCategory};

use crate::output::{render_table, OutputFormat};
use crate::SchemaCommands;

#[derive(Debug, Serialize, Tabled)]
pub struct FieldRow {
    pub id: String,
    pub kind: String,
    pub label: String,
    pub required: &'static str,
    pub options: String,
    #[tabled(rename = "shown when")]
    pub shown_when: String,
}

impl FieldRow {
    pub fn new(field: &FieldDefinition, locale: Locale) -> Self {
        let kind = serde_json::to_value(field.kind)
            .ok()
            .and_then(|v| v.as_str().map(String::from))
            .unwrap_or_default();
        let mut limits = Vec::new();
        if let Some(min) = field.constraints.min_length {
            limits.push(format!("min {min}"));
        }
        if let Some(max) = field.constraints.max_length {
            limits.push(format!("max {max}"));
        }
        let kind = if limits.is_empty() {
            kind
        } else {
            format!("{kind} ({})", limits.join(", "))
        };

        Self {
            id: field.id.clone(),
            kind,
            label: field.label.get(locale).to_string(),
            required: if field.required { "yes" } else { "" },
            options: field
                .options
                .iter()
                .map(|o| o.value.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            shown_when: field
                .visible_when
                .as_ref()
                .map(|c| format!("{} = {}", c.field, c.values.join(" | ")))
                .unwrap_or_default(),
        }
    }
}

fn print_tables(schema: &FormSchema, locale: Locale) {
    println!("{}", schema.service_name.get(locale).bold());
    for (i, section) in schema.sections.iter().enumerate() {
        println!();
        println!(
            "{} {}",
            format!("[{}/{}]", i + 1, schema.section_count()).dimmed(),
            section.title.get(locale).bold()
        );
        if let Some(description) = &section.description {
            println!("{}", description.get(locale).dimmed());
        }
        let rows: Vec<FieldRow> = section.fields.iter().map(|f| FieldRow::new(f, locale)).collect();
        println!("{}", render_table(&rows));
    }
}

pub fn handle(action: SchemaCommands, format: OutputFormat, locale: Locale) -> anyhow::Result<()> {
    match action {
        SchemaCommands::Show { service } => {
            let category: ServiceCategory = service.parse()?;
            let schema = FormSchemaRegistry::global()
                .get(category)
                .ok_or_else(|| anyhow::anyhow!("no form schema for {}", category))?;
            match format {
                OutputFormat::Table => print_tables(&schema, locale),
                _ => format.print_value(&*schema)?,
            }
        }
    }
    Ok(())
}
