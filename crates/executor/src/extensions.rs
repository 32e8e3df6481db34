//! Extension registry.
//!
//! Extensions are optional capability providers attached to a client. They
//! are registered by name on an [`ExtensionRegistry`] at composition time;
//! each client created from the registry builds every extension at most
//! once, on first use, and hands out shared typed handles.
//!
//! ```ignore
//! use odoo_executor::{Client, ExtensionRegistry, ModelActions};
//!
//! let mut registry = ExtensionRegistry::with_defaults();
//! registry.register("reports", || MyReports::default())?;
//!
//! let client = client.with_extensions(&registry);
//! let actions = client.extension::<ModelActions>(ModelActions::NAME)?;
//! actions.run(&client, "sale.order", "confirm", 15)?;
//! ```

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::debug;

use odoo_core::Value;

use crate::command::ListOrItem;
use crate::{Client, Error, Result};

type Instance = Arc<dyn Any + Send + Sync>;
type Factory = Arc<dyn Fn() -> Instance + Send + Sync>;

/// Name to factory mapping, populated explicitly.
#[derive(Clone, Default)]
pub struct ExtensionRegistry {
    factories: IndexMap<String, Factory>,
}

impl ExtensionRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the bundled extensions ([`ModelActions`]).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        let factory: Factory = Arc::new(|| Arc::new(ModelActions::new()) as Instance);
        registry
            .factories
            .insert(ModelActions::NAME.to_string(), factory);
        registry
    }

    /// Register a factory under `name`.
    pub fn register<T, F>(&mut self, name: impl Into<String>, factory: F) -> Result<()>
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let name = name.into();
        if self.factories.contains_key(&name) {
            return Err(Error::DuplicateExtension { name });
        }
        debug!(target: "odoo::extension", name = %name, "Registered extension");
        self.factories
            .insert(name, Arc::new(move || Arc::new(factory()) as Instance));
        Ok(())
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// True if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub(crate) fn attach(&self) -> Extensions {
        Extensions {
            factories: self.factories.clone(),
            instances: RwLock::new(HashMap::new()),
        }
    }
}

impl std::fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionRegistry")
            .field("names", &self.names())
            .finish()
    }
}

/// Extensions attached to one client.
pub(crate) struct Extensions {
    factories: IndexMap<String, Factory>,
    instances: RwLock<HashMap<String, Instance>>,
}

impl Extensions {
    pub(crate) fn get<T: Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>> {
        let existing = self.instances.read().get(name).cloned();
        let instance = match existing {
            Some(instance) => instance,
            None => {
                let factory = self.factories.get(name).ok_or_else(|| Error::UnknownExtension {
                    name: name.to_string(),
                })?;
                let mut instances = self.instances.write();
                instances
                    .entry(name.to_string())
                    .or_insert_with(|| factory())
                    .clone()
            }
        };

        instance
            .downcast::<T>()
            .map_err(|_| Error::ExtensionTypeMismatch {
                name: name.to_string(),
            })
    }
}

// =============================================================================
// Bundled: model actions
// =============================================================================

/// Friendly names for model action methods.
///
/// | Model | Action | Method |
/// |-------|--------|--------|
/// | `sale.order` | `confirm` | `action_confirm` |
/// | `account.move` | `update_payments` | `l10n_mx_edi_cfdi_invoice_try_update_payments` |
#[derive(Debug, Clone)]
pub struct ModelActions {
    actions: IndexMap<(String, String), String>,
}

impl ModelActions {
    /// Registry name of the bundled instance.
    pub const NAME: &'static str = "actions";

    /// Bundled action table.
    pub fn new() -> Self {
        ModelActions {
            actions: IndexMap::new(),
        }
        .with_action("sale.order", "confirm", "action_confirm")
        .with_action(
            "account.move",
            "update_payments",
            "l10n_mx_edi_cfdi_invoice_try_update_payments",
        )
    }

    /// Add or replace an action.
    pub fn with_action(
        mut self,
        model: impl Into<String>,
        action: impl Into<String>,
        method: impl Into<String>,
    ) -> Self {
        self.actions
            .insert((model.into(), action.into()), method.into());
        self
    }

    /// Method behind `action` on `model`.
    pub fn resolve(&self, model: &str, action: &str) -> Option<&str> {
        self.actions
            .get(&(model.to_string(), action.to_string()))
            .map(String::as_str)
    }

    /// Actions available on `model`.
    pub fn actions_for(&self, model: &str) -> Vec<&str> {
        self.actions
            .keys()
            .filter(|(m, _)| m == model)
            .map(|(_, action)| action.as_str())
            .collect()
    }

    /// Run `action` on records of `model` through [`Client::execute`].
    pub fn run(
        &self,
        client: &Client,
        model: &str,
        action: &str,
        ids: impl Into<ListOrItem<i64>>,
    ) -> Result<Value> {
        let method = self
            .resolve(model, action)
            .ok_or_else(|| Error::NotSupported {
                model: model.to_string(),
                method: action.to_string(),
            })?;
        client.execute(model, method, ids, None)
    }
}

impl Default for ModelActions {
    fn default() -> Self {
        Self::new()
    }
}
