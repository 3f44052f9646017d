use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use tessera_registry::{Registry, Singletons, TypeDescriptor};

use super::table::{Field, Layout, render};
use crate::models::{AppState, PLUGIN_BASE};

#[derive(Args, Clone, Debug)]
pub struct TypesArg {
    #[arg(long, help = "Print as JSON")]
    pub json: bool,
}

#[derive(Args, Clone, Debug)]
pub struct LookupArg {
    #[arg(help = "Type name, any case")]
    pub name: String,
}

#[derive(Debug, Serialize, Tabled)]
struct TypeRow {
    key:          String,
    name:         String,
    #[serde(skip_serializing_if = "String::is_empty")]
    parent:       String,
    capabilities: String,
    #[tabled(rename = "rust type")]
    rust_type:    &'static str,
}

impl From<&TypeDescriptor> for TypeRow {
    fn from(descriptor: &TypeDescriptor) -> Self {
        let capabilities = descriptor
            .capabilities()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        Self {
            key: descriptor.key().to_string(),
            name: descriptor.name().to_string(),
            parent: descriptor.parent().unwrap_or_default().to_string(),
            capabilities,
            rust_type: descriptor.type_path(),
        }
    }
}

fn rows(registry: &Registry) -> Vec<TypeRow> {
    registry.descriptors().iter().map(|d| TypeRow::from(d.as_ref())).collect()
}

pub fn types(arg: TypesArg) -> Result<()> {
    let rows = rows(Registry::global());

    if arg.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let footer = format!("{} registered", rows.len());
    println!("{}", render(rows, Layout::titled("types").footer(footer)));
    Ok(())
}

pub fn lookup(arg: LookupArg) -> Result<()> {
    let descriptor = Registry::global().lookup(&arg.name)?;
    let row = TypeRow::from(descriptor.as_ref());

    let fields = [
        Field::new("name", row.name),
        Field::new("key", row.key),
        Field::new("parent", row.parent),
        Field::new("capabilities", row.capabilities),
        Field::new("rust type", row.rust_type),
    ];
    println!("{}", render(fields, Layout::default().hide_header()));
    Ok(())
}

#[derive(Debug, Tabled)]
struct PluginRow {
    plugin: String,
    output: String,
}

pub fn plugins() -> Result<()> {
    let registry = Registry::global();
    let mut rows = Vec::new();

    for plugin in registry.subtypes(PLUGIN_BASE) {
        let output = registry
            .run(plugin.key())
            .with_context(|| format!("plugin '{}' failed", plugin.name()))?;
        rows.push(PluginRow {
            plugin: plugin.name().to_string(),
            output,
        });
    }

    tracing::info!(count = rows.len(), "plugins ran");
    println!("{}", render(rows, Layout::titled("plugins")));
    Ok(())
}

pub fn singleton() -> Result<()> {
    let singletons = Singletons::global();
    let first = singletons.get_or_init::<AppState>();
    let second = singletons.get_or_init::<AppState>();

    let fields = [
        Field::new("same instance", Arc::ptr_eq(&first, &second)),
        Field::new("debug", first.debug),
        Field::new("created at", format!("{:?}", first.created_at)),
        Field::new("singletons", singletons.len()),
    ];
    println!("{}", render(fields, Layout::titled("app state").hide_header()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_registry::Capability;

    #[test]
    fn test_rows_sorted_with_capabilities() {
        let rows = rows(Registry::global());
        let keys: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();

        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);

        let csv = rows.iter().find(|r| r.key == "csvplugin").unwrap();
        assert_eq!(csv.parent, "plugin");
        assert_eq!(csv.capabilities, Capability::Runnable.to_string());
    }

    #[test]
    fn test_json_omits_missing_parent() {
        let descriptor = Registry::global().lookup("basemodel").unwrap();
        let json = serde_json::to_value(TypeRow::from(descriptor.as_ref())).unwrap();

        assert_eq!(json["name"], "BaseModel");
        assert!(json.get("parent").is_none());
    }

    #[test]
    fn test_lookup_unknown_name_fails() {
        let err = lookup(LookupArg {
            name: "Nope".to_string(),
        })
        .unwrap_err();

        assert!(err.to_string().contains("'Nope'"));
    }
}
