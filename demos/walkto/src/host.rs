//! In-process stand-in for the game client.

use std::sync::Mutex;

use async_trait::async_trait;

use pt_behavior::{ActionKind, Entity, Host, ToolKind};
use pt_core::EntityId;

/// Creatures die when engaged; grooming answers with server text, which
/// the demo forwards to the agent like a real client would.
pub struct DemoHost {
    entities: Mutex<Vec<Entity>>,
    lines:    Mutex<Vec<String>>,
    actions:  Mutex<usize>,
}

impl DemoHost {
    pub fn new(entities: Vec<Entity>) -> Self {
        Self {
            entities: Mutex::new(entities),
            lines:    Mutex::new(Vec::new()),
            actions:  Mutex::new(0),
        }
    }

    /// Server lines produced since the last call.
    pub fn drain_lines(&self) -> Vec<String> {
        self.lines.lock().map(|mut l| std::mem::take(&mut *l)).unwrap_or_default()
    }

    pub fn nearby_count(&self) -> usize {
        self.entities.lock().map_or(0, |e| e.len())
    }

    pub fn action_count(&self) -> usize {
        self.actions.lock().map_or(0, |a| *a)
    }

    fn say(&self, line: String) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line);
        }
    }
}

#[async_trait]
impl Host for DemoHost {
    fn nearby(&self) -> Vec<Entity> {
        self.entities.lock().map(|e| e.clone()).unwrap_or_default()
    }

    fn is_busy(&self) -> bool {
        false
    }

    fn has_tool(&self, tool: ToolKind) -> bool {
        matches!(tool, ToolKind::GroomingBrush)
    }

    async fn perform(&self, action: ActionKind, target: Option<EntityId>) {
        if let Ok(mut n) = self.actions.lock() {
            *n += 1;
        }
        let Some(id) = target else { return };
        match action {
            ActionKind::Engage => {
                if let Ok(mut entities) = self.entities.lock() {
                    entities.retain(|e| e.id != id);
                }
                self.say(format!("You kill the creature ({id})."));
            }
            ActionKind::Groom => {
                let name = self.entity(id).map(|e| e.name).unwrap_or_default();
                self.say(format!("You have now tended to the {name}."));
            }
            ActionKind::Target | ActionKind::Untarget => {}
        }
    }
}
