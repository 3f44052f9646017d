//! Types registered with the global registry at link time.

use std::time::SystemTime;

use tessera_registry::{Registered, RunError, Runnable, TypeDescriptor, register_type};

pub const PLUGIN_BASE: &str = "Plugin";

pub struct BaseModel;

impl Registered for BaseModel {
    const NAME: &'static str = "BaseModel";
}

pub struct User;

impl Registered for User {
    const NAME: &'static str = "User";
    const PARENT: Option<&'static str> = Some(BaseModel::NAME);
}

pub struct Product;

impl Registered for Product {
    const NAME: &'static str = "Product";
    const PARENT: Option<&'static str> = Some(BaseModel::NAME);
}

#[derive(Default)]
pub struct CsvPlugin;

impl Registered for CsvPlugin {
    const NAME: &'static str = "CsvPlugin";
    const PARENT: Option<&'static str> = Some(PLUGIN_BASE);

    fn descriptor() -> TypeDescriptor { TypeDescriptor::of::<Self>().runnable::<Self>() }
}

impl Runnable for CsvPlugin {
    fn run(&self) -> Result<String, RunError> { Ok("csv reader ready".to_string()) }
}

#[derive(Default)]
pub struct JsonPlugin;

impl Registered for JsonPlugin {
    const NAME: &'static str = "JsonPlugin";
    const PARENT: Option<&'static str> = Some(PLUGIN_BASE);

    fn descriptor() -> TypeDescriptor { TypeDescriptor::of::<Self>().runnable::<Self>() }
}

impl Runnable for JsonPlugin {
    fn run(&self) -> Result<String, RunError> { Ok("json reader ready".to_string()) }
}

register_type!(BaseModel, User, Product, CsvPlugin, JsonPlugin);

/// Process-wide settings object handed out through `Singletons`.
#[derive(Debug)]
pub struct AppState {
    pub debug:      bool,
    pub created_at: SystemTime,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            debug:      true,
            created_at: SystemTime::now(),
        }
    }
}
