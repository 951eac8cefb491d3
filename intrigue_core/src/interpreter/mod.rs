//! Rule Interpreter - walks a rule graph for a pair of actors.
//!
//! The walk works as follows:
//! 1. **Start**: begin at the Start node's `Run` port
//! 2. **Evaluate**: each visited node picks one output port from the actor(s)
//!    selected by the channel it was reached through
//! 3. **Fan out**: every destination wired to that port is visited, depth first,
//!    in wiring order
//! 4. **Collect**: Error and Warning nodes append their messages and continue
//!    through `Next`
//! 5. **Verdict**: the result is Failed exactly when an error was collected
//!
//! Structural faults end the walk and are reported as an error message, never
//! as a Rust error. They are an unknown rule, a graph without a Start node, and
//! a cycle: one path re-entering a node with the same actors, or entering it
//! more than [`InterpreterConfig::max_node_visits`] times. Branches that rejoin
//! are separate paths and never count against each other.

mod result;
mod traversal;

pub use result::*;

use intrigue_world::{Actor, Gender, WorldQuery};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::bridge::{InvocationBridge, InvokeContext, InvokeValue};
use crate::config::InterpreterConfig;
use crate::error::RuleFault;
use crate::graph::{Channel, NodeKind, Port, RuleSource, Selector};
use crate::scheme::Scheme;
use traversal::{render, Entry, Frame, Pair, Traversal};

/// What a visited node decided.
enum Step<'a> {
    /// End this branch.
    Stop,
    /// End the whole evaluation.
    Halt,
    /// Visit everything wired to `port`, with the given bindings.
    Follow {
        port: Port,
        pair: Pair<'a>,
        subject: Option<&'a Actor>,
    },
}

/// Inputs shared by every node of one evaluation.
struct Evaluation<'a> {
    rule_id: &'a str,
    scheme: Option<&'a Scheme>,
    world: &'a dyn WorldQuery,
}

impl<'a> Evaluation<'a> {
    fn context(&self, pair: &Pair<'a>) -> InvokeContext<'a> {
        InvokeContext {
            rule_id: self.rule_id,
            scheme: self.scheme,
            conspirator: pair.conspirator,
            target: pair.target,
            world: self.world,
        }
    }
}

/// Evaluates rule graphs by id.
///
/// Cheap to clone; graphs and the bridge are shared.
#[derive(Clone)]
pub struct Ruler {
    rules: Arc<dyn RuleSource>,
    bridge: Arc<InvocationBridge>,
    config: InterpreterConfig,
}

impl Ruler {
    pub fn new(rules: Arc<dyn RuleSource>, bridge: Arc<InvocationBridge>) -> Self {
        Self {
            rules,
            bridge,
            config: InterpreterConfig::default(),
        }
    }

    pub fn with_config(mut self, config: InterpreterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    pub fn bridge(&self) -> &InvocationBridge {
        &self.bridge
    }

    /// Evaluate the graph registered under `rule_id`.
    pub fn start_graph(
        &self,
        world: &dyn WorldQuery,
        rule_id: &str,
        conspirator: &Actor,
        target: Option<&Actor>,
    ) -> RuleResult {
        self.evaluate(
            &Evaluation {
                rule_id,
                scheme: None,
                world,
            },
            conspirator,
            target,
        )
    }

    /// Evaluate a scheme's rule graph; scheme-scoped bridge methods see the scheme.
    pub fn start_scheme_graph(
        &self,
        world: &dyn WorldQuery,
        scheme: &Scheme,
        conspirator: &Actor,
        target: Option<&Actor>,
    ) -> RuleResult {
        self.evaluate(
            &Evaluation {
                rule_id: &scheme.rule_id,
                scheme: Some(scheme),
                world,
            },
            conspirator,
            target,
        )
    }

    fn evaluate<'a>(
        &self,
        eval: &Evaluation<'a>,
        conspirator: &'a Actor,
        target: Option<&'a Actor>,
    ) -> RuleResult {
        let mut traversal = Traversal::new();
        let pair = Pair {
            conspirator,
            target,
        };

        if let Err(fault) = self.traverse(eval, pair, &mut traversal) {
            warn!(rule = eval.rule_id, %fault, "rule evaluation aborted");
            traversal.error(fault.to_string());
        }

        let result = RuleResult::new(traversal.warnings, traversal.errors);
        debug!(
            rule = eval.rule_id,
            state = ?result.state(),
            warnings = result.warnings().len(),
            errors = result.errors().len(),
            "rule evaluated"
        );
        result
    }

    fn traverse<'a>(
        &self,
        eval: &Evaluation<'a>,
        pair: Pair<'a>,
        traversal: &mut Traversal,
    ) -> Result<(), RuleFault> {
        let graph = self
            .rules
            .graph(eval.rule_id)
            .ok_or_else(|| RuleFault::UnknownRule(eval.rule_id.to_string()))?;
        let start = graph
            .start()
            .ok_or_else(|| RuleFault::MissingStart(eval.rule_id.to_string()))?;

        let mut stack = vec![Frame {
            node: start,
            channel: None,
            pair,
            subject: pair.target.or(Some(pair.conspirator)),
            parent: None,
        }];

        while let Some(frame) = stack.pop() {
            let step = match traversal.enter(&frame, self.config.max_node_visits) {
                Entry::Step(index) => index,
                Entry::Cycle => {
                    return Err(RuleFault::Cycle {
                        rule: eval.rule_id.to_string(),
                        node: frame.node,
                    })
                }
                Entry::OverLimit => {
                    return Err(RuleFault::VisitLimit {
                        rule: eval.rule_id.to_string(),
                        node: frame.node,
                        limit: self.config.max_node_visits,
                    })
                }
            };
            let Some(node) = graph.node(frame.node) else {
                continue;
            };

            match self.step(&node.kind, &frame, eval, traversal) {
                Step::Stop => {
                    debug!(rule = eval.rule_id, node = %node.id, kind = node.kind.name(), "branch ended");
                }
                Step::Halt => return Ok(()),
                Step::Follow {
                    port,
                    pair,
                    subject,
                } => {
                    debug!(
                        rule = eval.rule_id,
                        node = %node.id,
                        kind = node.kind.name(),
                        channel = ?frame.channel,
                        %port,
                        "rule node evaluated"
                    );
                    // Reversed so the first wired destination is visited first.
                    for link in graph.outputs(node.id, port).iter().rev() {
                        stack.push(Frame {
                            node: link.node,
                            channel: link.channel,
                            pair,
                            subject,
                            parent: Some(step),
                        });
                    }
                }
            }
        }

        Ok(())
    }

    fn step<'a>(
        &self,
        kind: &NodeKind,
        frame: &Frame<'a>,
        eval: &Evaluation<'a>,
        traversal: &mut Traversal,
    ) -> Step<'a> {
        let follow = |port: Port| Step::Follow {
            port,
            pair: frame.pair,
            subject: frame.subject,
        };
        let judged = |actor: &'a Actor, port: Port| Step::Follow {
            port,
            pair: frame.pair,
            subject: Some(actor),
        };

        match kind {
            NodeKind::Start => follow(Port::Run),

            NodeKind::Gender => match frame.actor() {
                Some(actor) => {
                    let port = match actor.gender {
                        Gender::Male => Port::Male,
                        Gender::Female => Port::Female,
                    };
                    judged(actor, port)
                }
                None => Step::Stop,
            },

            NodeKind::GetActor { actor: selector } => {
                let Some(actor) = frame.actor() else {
                    return Step::Stop;
                };
                let wanted = match selector {
                    Selector::Fixed(id) => Some(*id),
                    Selector::Invoked(method) => {
                        match self.bridge.invoke(method, &eval.context(&frame.pair)) {
                            Some(InvokeValue::Actor(id)) => Some(id),
                            _ => None,
                        }
                    }
                };
                judged(actor, is_port(wanted == Some(actor.id)))
            }

            NodeKind::GetClan { clan: selector } => {
                let Some(actor) = frame.actor() else {
                    return Step::Stop;
                };
                let wanted = match selector {
                    Selector::Fixed(id) => Some(*id),
                    Selector::Invoked(method) => {
                        match self.bridge.invoke(method, &eval.context(&frame.pair)) {
                            Some(InvokeValue::Clan(id)) => Some(id),
                            _ => None,
                        }
                    }
                };
                judged(actor, is_port(wanted.is_some() && actor.clan == wanted))
            }

            NodeKind::GetRole { role } => {
                let Some(actor) = frame.actor() else {
                    return Step::Stop;
                };
                judged(actor, is_port(actor.role == Some(*role)))
            }

            NodeKind::GetFamily { family: selector } => {
                let Some(actor) = frame.actor() else {
                    return Step::Stop;
                };
                let wanted = match selector {
                    Selector::Fixed(id) => Some(*id),
                    Selector::Invoked(method) => {
                        match self.bridge.invoke(method, &eval.context(&frame.pair)) {
                            Some(InvokeValue::Family(id)) => Some(id),
                            _ => None,
                        }
                    }
                };
                judged(actor, is_port(wanted.is_some() && actor.family == wanted))
            }

            NodeKind::IsAi => match frame.actor() {
                Some(actor) => judged(actor, bool_port(actor.is_ai)),
                None => Step::Stop,
            },

            NodeKind::IsParent => {
                let Some(target) = frame.pair.target else {
                    return Step::Stop;
                };
                let conspirator = frame.pair.conspirator;
                let related = match frame.channel {
                    Some(Channel::Conspirator) => conspirator.is_parent_of(target),
                    Some(Channel::Target) => target.is_parent_of(conspirator),
                    _ => conspirator.is_parent_of(target) || target.is_parent_of(conspirator),
                };
                follow(bool_port(related))
            }

            NodeKind::IsSibling => {
                let Some(target) = frame.pair.target else {
                    return Step::Stop;
                };
                follow(bool_port(frame.pair.conspirator.is_sibling_of(target)))
            }

            NodeKind::Invoke { method } => {
                match self.bridge.invoke(method, &eval.context(&frame.pair)) {
                    None => follow(Port::Null),
                    Some(InvokeValue::Bool(b)) => follow(bool_port(b)),
                    Some(InvokeValue::Actor(id)) => match eval.world.actor(id) {
                        Some(actor) => {
                            let mut pair = frame.pair;
                            match frame.channel {
                                Some(Channel::Conspirator) => pair.conspirator = actor,
                                Some(Channel::Target) | Some(Channel::Dual) => {
                                    pair.target = Some(actor)
                                }
                                Some(Channel::Actor) | None => {}
                            }
                            Step::Follow {
                                port: Port::True,
                                pair,
                                subject: Some(actor),
                            }
                        }
                        None => follow(Port::Null),
                    },
                    Some(InvokeValue::ActorPair(c, t)) => {
                        match (eval.world.actor(c), eval.world.actor(t)) {
                            (Some(conspirator), Some(target)) => Step::Follow {
                                port: Port::True,
                                pair: Pair {
                                    conspirator,
                                    target: Some(target),
                                },
                                subject: Some(target),
                            },
                            _ => follow(Port::Null),
                        }
                    }
                    Some(InvokeValue::Clan(_)) | Some(InvokeValue::Family(_)) => follow(Port::True),
                }
            }

            NodeKind::Error { message } => {
                traversal.error(render(message, &frame.pair, &self.config));
                if self.config.stop_at_first_error {
                    Step::Halt
                } else {
                    follow(Port::Next)
                }
            }

            NodeKind::Warning { message } => {
                traversal.warn(render(message, &frame.pair, &self.config));
                follow(Port::Next)
            }
        }
    }
}

fn bool_port(value: bool) -> Port {
    if value {
        Port::True
    } else {
        Port::False
    }
}

fn is_port(matches: bool) -> Port {
    if matches {
        Port::Is
    } else {
        Port::IsNot
    }
}
