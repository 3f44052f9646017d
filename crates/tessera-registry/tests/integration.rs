use std::collections::HashMap;

use proptest::prelude::*;
use tessera_registry::{
    Capability, Registered, Registry, RunError, Runnable, TypeDescriptor, register_type,
};

struct BaseModel;

impl Registered for BaseModel {
    const NAME: &'static str = "BaseModel";
}

struct Usuario;

impl Registered for Usuario {
    const NAME: &'static str = "Usuario";
    const PARENT: Option<&'static str> = Some(BaseModel::NAME);
}

#[derive(Default)]
struct JsonPlugin;

impl Registered for JsonPlugin {
    const NAME: &'static str = "JsonPlugin";
    const PARENT: Option<&'static str> = Some("Plugin");

    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::of::<Self>().runnable::<Self>()
    }
}

impl Runnable for JsonPlugin {
    fn run(&self) -> Result<String, RunError> {
        Ok("json ready".to_string())
    }
}

register_type!(BaseModel, Usuario, JsonPlugin);

#[test]
fn test_inventory_types_reach_global_registry() {
    let registry = Registry::global();

    assert!(registry.lookup("basemodel").unwrap().is::<BaseModel>());
    assert!(registry.lookup("usuario").unwrap().is::<Usuario>());
    assert!(registry.lookup("jsonplugin").unwrap().is::<JsonPlugin>());
}

#[test]
fn test_from_inventory_builds_independent_registry() {
    let registry = Registry::from_inventory();
    registry.register_as::<Usuario>("Cliente");

    assert!(registry.contains("cliente"));
    assert!(!Registry::global().contains("cliente"));
}

#[test]
fn test_plugin_discovery_through_parent() {
    let registry = Registry::global();

    let plugins = registry.subtypes("plugin");
    assert_eq!(plugins.len(), 1);
    assert!(plugins[0].has(Capability::Runnable));
    assert_eq!(registry.run("jsonplugin").unwrap(), "json ready");
}

proptest! {
    #[test]
    fn prop_lookup_returns_last_registration(names in prop::collection::vec("[A-Za-z][A-Za-z0-9_]{0,8}", 1..24)) {
        let registry = Registry::new();
        let mut expected: HashMap<String, String> = HashMap::new();

        for name in &names {
            let before = registry.len();
            let displaced = registry.register_as::<BaseModel>(name.clone());
            let key = name.to_lowercase();

            prop_assert_eq!(displaced.is_some(), expected.contains_key(&key));
            prop_assert_eq!(registry.len(), before + usize::from(displaced.is_none()));
            expected.insert(key, name.clone());
        }

        prop_assert_eq!(registry.len(), expected.len());
        for (key, name) in &expected {
            let found = registry.lookup(&name.to_uppercase()).unwrap();
            prop_assert_eq!(found.key(), key.as_str());
            prop_assert_eq!(found.name(), name.as_str());
        }
    }
}
