//! Node-id prefix for log lines.

/// Records not attributed to any device.
pub const NO_NODE: u8 = 0;

/// The controller itself, also used for broadcast traffic.
pub const CONTROLLER_NODE: u8 = 255;

/// `0` renders nothing, `255` renders `"contrlr, "`, everything else `"NodeNNN, "`.
#[must_use]
pub fn node_prefix(node_id: u8) -> String {
    match node_id {
        NO_NODE => String::new(),
        CONTROLLER_NODE => "contrlr, ".to_string(),
        id => format!("Node{id:03}, "),
    }
}
