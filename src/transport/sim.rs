//! In-memory panel transport for driving the core without a live server
//!
//! Implements the transport traits over a hand-built node tree. The CLI uses
//! the default panel to exercise the full discover/export/perturb flow, and
//! tests use the builders to shape arbitrary trees, inject connect failures,
//! and observe session close calls.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::snapshot::Value;
use crate::transport::{Connector, NodeHandle, Session, TransportError};

#[derive(Debug)]
struct NodeData {
    name: String,
    node_id: String,
    value: Mutex<Option<Value>>,
    children: Vec<SimNode>,
}

/// Handle to one node of the simulated panel tree
#[derive(Clone, Debug)]
pub struct SimNode(Arc<NodeData>);

impl SimNode {
    fn build(name: &str, value: Option<Value>, children: Vec<SimNode>) -> Self {
        Self(Arc::new(NodeData {
            name: name.to_string(),
            node_id: format!("ns=3;s={}", name),
            value: Mutex::new(value),
            children,
        }))
    }

    /// A leaf variable with a value
    pub fn variable(name: &str, value: impl Into<Value>) -> Self {
        Self::build(name, Some(value.into()), Vec::new())
    }

    /// A pure container: children but no readable value
    pub fn container(name: &str, children: Vec<SimNode>) -> Self {
        Self::build(name, None, children)
    }

    /// A node carrying both a value and children
    pub fn group(name: &str, value: impl Into<Value>, children: Vec<SimNode>) -> Self {
        Self::build(name, Some(value.into()), children)
    }

    /// Rebuild this node with an explicit node id
    ///
    /// Lets tests alias two tree positions to one server node, which is how
    /// a namespace cycle shows up to the walker.
    pub fn with_node_id(&self, node_id: &str) -> Self {
        Self(Arc::new(NodeData {
            name: self.0.name.clone(),
            node_id: node_id.to_string(),
            value: Mutex::new(self.0.value.lock().clone()),
            children: self.0.children.clone(),
        }))
    }

    fn child_named(&self, name: &str) -> Option<SimNode> {
        self.0.children.iter().find(|c| c.0.name == name).cloned()
    }
}

impl NodeHandle for SimNode {
    fn name(&self) -> String {
        self.0.name.clone()
    }

    fn node_id(&self) -> String {
        self.0.node_id.clone()
    }

    fn value(&self) -> Result<Value, TransportError> {
        self.0
            .value
            .lock()
            .clone()
            .ok_or_else(|| TransportError::ValueUnavailable {
                node_id: self.0.node_id.clone(),
            })
    }

    fn write_value(&self, value: &Value) -> Result<(), TransportError> {
        let mut slot = self.0.value.lock();
        if slot.is_none() {
            return Err(TransportError::WriteRejected {
                node_id: self.0.node_id.clone(),
                reason: "node has no value attribute".to_string(),
            });
        }
        *slot = Some(value.clone());
        Ok(())
    }

    fn children(&self) -> Vec<SimNode> {
        self.0.children.clone()
    }
}

/// Session over a simulated panel
pub struct SimSession {
    objects: SimNode,
    closed: bool,
    close_count: Arc<AtomicUsize>,
}

impl Session for SimSession {
    type Node = SimNode;

    fn resolve(&self, path: &[&str]) -> Result<SimNode, TransportError> {
        let mut node = self.objects.clone();
        for part in path {
            node = node
                .child_named(part)
                .ok_or_else(|| TransportError::NodeResolution {
                    path: path.join("/"),
                })?;
        }
        Ok(node)
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.close_count.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Connector that hands out sessions over one shared panel tree
pub struct SimConnector {
    objects: SimNode,
    fail_connect: Option<String>,
    close_count: Arc<AtomicUsize>,
}

impl SimConnector {
    /// Connector over a custom objects tree
    pub fn new(objects: SimNode) -> Self {
        Self {
            objects,
            fail_connect: None,
            close_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A small WinCC-style panel with a few process tags and one group
    pub fn default_panel() -> Self {
        Self::new(SimNode::container(
            "Objects",
            vec![SimNode::container(
                "WinCC Panel RT",
                vec![SimNode::container(
                    "Tags",
                    vec![
                        SimNode::variable("Tag_Temperature", 21.5),
                        SimNode::variable("Tag_Pressure", 1.2),
                        SimNode::variable("Tag_SetPoint", 50.0),
                        SimNode::variable("Tag_PumpRunning", false),
                        SimNode::variable("Tag_Recipe", "standard"),
                        SimNode::variable("Tag_ScreenNumber", 1.0),
                        SimNode::variable("@DiagnosticsIndicatorTag", 0.0),
                        SimNode::container(
                            "Motor",
                            vec![
                                SimNode::variable("Tag_MotorSpeed", 1450.0),
                                SimNode::variable("Tag_MotorEnabled", true),
                            ],
                        ),
                    ],
                )],
            )],
        ))
    }

    /// Connector whose `open` always fails with the given reason
    pub fn failing(reason: &str) -> Self {
        let mut connector = Self::new(SimNode::container("Objects", Vec::new()));
        connector.fail_connect = Some(reason.to_string());
        connector
    }

    /// Total close calls across every session this connector opened
    pub fn close_count(&self) -> usize {
        self.close_count.load(Ordering::SeqCst)
    }
}

impl Connector for SimConnector {
    type Session = SimSession;

    fn open(&self, url: &str) -> Result<SimSession, TransportError> {
        if let Some(reason) = &self.fail_connect {
            return Err(TransportError::Connection {
                url: url.to_string(),
                reason: reason.clone(),
            });
        }
        if !url.contains("://") {
            return Err(TransportError::Connection {
                url: url.to_string(),
                reason: "malformed endpoint url".to_string(),
            });
        }
        Ok(SimSession {
            objects: self.objects.clone(),
            closed: false,
            close_count: Arc::clone(&self.close_count),
        })
    }
}
