// Tool capability registry
#![allow(dead_code)]

use crate::executor::Shell;
use crate::os::{OsFamily, OsInfo};
use crate::tool::error::{Result, ToolError};
use crate::tool::ifconfig::{Ifconfig, IfconfigBsd, IfconfigGeneric};
use crate::tool::modprobe::{Modprobe, ModprobeLinux};
use crate::tool::traits::{Binding, ToolContext, ToolId, ToolKind};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;
use tracing::{debug, info};

type Factory = Arc<dyn Fn(ToolContext) -> Box<dyn Any + Send + Sync> + Send + Sync>;

/// Registered variants of one tool family
struct Variants {
    default: Option<Factory>,
    families: HashMap<OsFamily, Factory>,
}

/// Maps tool identifiers to the variant that applies to an OS family.
///
/// Built once at startup and read-only afterwards; share it behind an `Arc`.
#[derive(Default)]
pub struct Registry {
    tools: HashMap<ToolId, Variants>,
}

impl Registry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in tool
    pub fn builtin() -> Self {
        let mut registry = Self::new();

        registry.register_default::<dyn Ifconfig, _>(|ctx| Arc::new(IfconfigGeneric::new(ctx)));
        registry.register::<dyn Ifconfig, _>(OsFamily::Bsd, |ctx| Arc::new(IfconfigBsd::new(ctx)));
        registry.register::<dyn Modprobe, _>(OsFamily::Linux, |ctx| {
            Arc::new(ModprobeLinux::new(ctx))
        });

        info!(tool_count = registry.tools.len(), "registry initialized with tools");
        registry
    }

    /// Register the variant used when no OS-specific one matches
    pub fn register_default<K, F>(&mut self, factory: F)
    where
        K: ToolKind + ?Sized,
        F: Fn(ToolContext) -> Arc<K> + Send + Sync + 'static,
    {
        self.variants_mut::<K>().default = Some(erase(factory));
    }

    /// Register the variant for an OS family and its descendants
    pub fn register<K, F>(&mut self, family: OsFamily, factory: F)
    where
        K: ToolKind + ?Sized,
        F: Fn(ToolContext) -> Arc<K> + Send + Sync + 'static,
    {
        self.variants_mut::<K>()
            .families
            .insert(family, erase(factory));
    }

    fn variants_mut<K: ToolKind + ?Sized>(&mut self) -> &mut Variants {
        self.tools.entry(ToolId::of::<K>()).or_insert_with(|| Variants {
            default: None,
            families: HashMap::new(),
        })
    }

    pub fn is_registered<K: ToolKind + ?Sized>(&self) -> bool {
        self.tools.contains_key(&ToolId::of::<K>())
    }

    /// All bindings registered for a tool, OS-specific ones sorted first
    pub fn variants<K: ToolKind + ?Sized>(&self) -> Vec<Binding> {
        let Some(variants) = self.tools.get(&ToolId::of::<K>()) else {
            return Vec::new();
        };
        let mut families: Vec<OsFamily> = variants.families.keys().copied().collect();
        families.sort();

        let mut bindings: Vec<Binding> = families.into_iter().map(Binding::Family).collect();
        if variants.default.is_some() {
            bindings.push(Binding::Default);
        }
        bindings
    }

    /// Pick the binding that applies to `family`: the most specific family in
    /// its lineage, else the default.
    pub fn lookup(&self, id: ToolId, family: OsFamily) -> Result<Binding> {
        self.find(id, family).map(|(binding, _)| binding)
    }

    fn find(&self, id: ToolId, family: OsFamily) -> Result<(Binding, &Factory)> {
        let not_supported = || ToolError::NotSupported {
            tool: id.name().to_string(),
            family,
        };
        let variants = self.tools.get(&id).ok_or_else(not_supported)?;

        family
            .lineage()
            .into_iter()
            .find_map(|f| variants.families.get(&f).map(|v| (Binding::Family(f), v)))
            .or_else(|| variants.default.as_ref().map(|v| (Binding::Default, v)))
            .ok_or_else(not_supported)
    }

    /// Build the tool instance that applies to `os`, bound to `shell`
    pub fn resolve<K: ToolKind + ?Sized>(
        &self,
        os: &OsInfo,
        shell: Arc<Shell>,
    ) -> Result<Resolved<K>> {
        let id = ToolId::of::<K>();
        let (binding, factory) = self.find(id, os.family)?;

        debug!(tool = %id, family = %os.family, binding = %binding, "resolved tool");

        let ctx = ToolContext {
            shell,
            os: os.clone(),
            binding,
        };
        let instance = factory(ctx)
            .downcast::<Arc<K>>()
            .map(|boxed| *boxed)
            .map_err(|_| ToolError::NotSupported {
                tool: id.name().to_string(),
                family: os.family,
            })?;

        Ok(Resolved { binding, instance })
    }
}

fn erase<K, F>(factory: F) -> Factory
where
    K: ToolKind + ?Sized,
    F: Fn(ToolContext) -> Arc<K> + Send + Sync + 'static,
{
    Arc::new(move |ctx| Box::new(factory(ctx)) as Box<dyn Any + Send + Sync>)
}

/// A tool instance together with the registration it came from
pub struct Resolved<K: ToolKind + ?Sized> {
    binding: Binding,
    instance: Arc<K>,
}

impl<K: ToolKind + ?Sized> Resolved<K> {
    pub fn binding(&self) -> Binding {
        self.binding
    }

    pub fn instance(&self) -> &Arc<K> {
        &self.instance
    }
}

impl<K: ToolKind + ?Sized> Clone for Resolved<K> {
    fn clone(&self) -> Self {
        Self {
            binding: self.binding,
            instance: Arc::clone(&self.instance),
        }
    }
}

impl<K: ToolKind + ?Sized> fmt::Debug for Resolved<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolved")
            .field("tool", &K::NAME)
            .field("binding", &self.binding)
            .finish()
    }
}

impl<K: ToolKind + ?Sized> Deref for Resolved<K> {
    type Target = K;

    fn deref(&self) -> &K {
        &self.instance
    }
}
