//! Invocation Bridge - dispatches rule graph calls to host predicates by name.
//!
//! Hosts register their predicate functions on a [`BridgeBuilder`]; calling
//! [`BridgeBuilder::build`] is the synchronization pass that freezes the
//! registrations into an [`InvocationBridge`]. Each method name ends up with
//! exactly one binding whose callback is `None` when the method has no live
//! provider, or more than one. Invoking such a name, or an unknown one, yields
//! null instead of an error.

mod shape;

pub use shape::*;

use intrigue_world::{Actor, WorldQuery};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A registered predicate, already adapted to the common calling convention.
pub type Callback = Arc<dyn Fn(&InvokeContext<'_>) -> Option<InvokeValue> + Send + Sync>;

/// Name and declared shapes of a bridge method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    pub name: String,
    /// Type the method is declared on.
    pub owner: String,
    pub call: CallShape,
    pub returns: ReturnShape,
}

struct Registration {
    signature: MethodSignature,
    callback: Option<Callback>,
}

/// Collects predicate registrations before a synchronization pass.
#[derive(Default)]
pub struct BridgeBuilder {
    registrations: Vec<Registration>,
}

impl BridgeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a method taking the full evaluation context.
    ///
    /// Every call registers one live provider; registering the same name
    /// twice makes it ambiguous.
    pub fn scheme_scoped<R, F>(
        &mut self,
        owner: impl Into<String>,
        name: impl Into<String>,
        f: F,
    ) -> &mut Self
    where
        R: Returnable,
        F: Fn(&InvokeContext<'_>) -> Option<R> + Send + Sync + 'static,
    {
        let callback: Callback = Arc::new(move |ctx: &InvokeContext<'_>| f(ctx).map(R::into_value));
        self.push(owner.into(), name.into(), CallShape::Scheme, R::SHAPE, Some(callback))
    }

    /// Register a method taking the conspirator and the target.
    pub fn pair_scoped<R, F>(
        &mut self,
        owner: impl Into<String>,
        name: impl Into<String>,
        f: F,
    ) -> &mut Self
    where
        R: Returnable,
        F: Fn(&Actor, &Actor, &dyn WorldQuery) -> Option<R> + Send + Sync + 'static,
    {
        let callback: Callback = Arc::new(move |ctx: &InvokeContext<'_>| {
            let target = ctx.target?;
            f(ctx.conspirator, target, ctx.world).map(R::into_value)
        });
        self.push(owner.into(), name.into(), CallShape::ActorPair, R::SHAPE, Some(callback))
    }

    /// Declare a method whose owner currently has no live provider.
    pub fn declare(
        &mut self,
        owner: impl Into<String>,
        name: impl Into<String>,
        call: CallShape,
        returns: ReturnShape,
    ) -> &mut Self {
        self.push(owner.into(), name.into(), call, returns, None)
    }

    fn push(
        &mut self,
        owner: String,
        name: String,
        call: CallShape,
        returns: ReturnShape,
        callback: Option<Callback>,
    ) -> &mut Self {
        self.registrations.push(Registration {
            signature: MethodSignature {
                name,
                owner,
                call,
                returns,
            },
            callback,
        });
        self
    }

    /// Run the synchronization pass.
    pub fn build(self) -> InvocationBridge {
        let mut grouped: HashMap<String, Vec<Registration>> = HashMap::new();
        for registration in self.registrations {
            grouped
                .entry(registration.signature.name.clone())
                .or_default()
                .push(registration);
        }

        let mut bindings = HashMap::with_capacity(grouped.len());
        for (name, mut registrations) in grouped {
            let live = registrations.iter().filter(|r| r.callback.is_some()).count();
            let signature = registrations[0].signature.clone();
            let callback = match live {
                0 => {
                    warn!(method = %name, owner = %signature.owner, "no live provider for bridge method");
                    None
                }
                1 => registrations
                    .iter_mut()
                    .find_map(|r| r.callback.take()),
                n => {
                    warn!(method = %name, providers = n, "ambiguous bridge method, binding left empty");
                    None
                }
            };
            bindings.insert(name, Binding { signature, callback });
        }

        let bridge = InvocationBridge { bindings };
        info!(
            methods = bridge.bindings.len(),
            bound = bridge.bound_count(),
            "invocation bridge synchronized"
        );
        bridge
    }
}

/// A method name resolved during synchronization.
pub struct Binding {
    pub signature: MethodSignature,
    pub callback: Option<Callback>,
}

/// Read-only name -> predicate table consulted by the interpreter.
///
/// Rebuild it with a fresh [`BridgeBuilder`]; it must not be replaced while
/// evaluations that share it are running.
#[derive(Default)]
pub struct InvocationBridge {
    bindings: HashMap<String, Binding>,
}

impl InvocationBridge {
    /// A bridge with no methods; every invocation yields null.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Call `name`. Unknown, missing and ambiguous methods yield `None`.
    pub fn invoke(&self, name: &str, ctx: &InvokeContext<'_>) -> Option<InvokeValue> {
        let Some(binding) = self.bindings.get(name) else {
            debug!(method = name, "unknown bridge method");
            return None;
        };
        let callback = binding.callback.as_ref()?;
        callback(ctx)
    }

    /// Call a boolean method: true, false, or null.
    pub fn invoke_bool(&self, name: &str, ctx: &InvokeContext<'_>) -> Option<bool> {
        match self.invoke(name, ctx)? {
            InvokeValue::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn signature(&self, name: &str) -> Option<&MethodSignature> {
        self.bindings.get(name).map(|b| &b.signature)
    }

    /// Whether `name` resolved to exactly one live provider.
    pub fn is_bound(&self, name: &str) -> bool {
        self.bindings.get(name).is_some_and(|b| b.callback.is_some())
    }

    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    pub fn bound_count(&self) -> usize {
        self.bindings.values().filter(|b| b.callback.is_some()).count()
    }
}

impl std::fmt::Debug for InvocationBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.method_names().collect();
        names.sort();
        f.debug_struct("InvocationBridge")
            .field("methods", &names)
            .field("bound", &self.bound_count())
            .finish()
    }
}
