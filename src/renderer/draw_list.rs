//! Recorded draw commands
//!
//! Headless render target used by the native runner and tests.

use super::RenderTarget;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(String),
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: String,
    },
    Circle {
        x: f32,
        y: f32,
        radius: f32,
        color: String,
        alpha: f32,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }
}

impl RenderTarget for DrawList {
    fn clear(&mut self, color: &str) {
        // A clear wipes everything before it
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color.to_string()));
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str) {
        self.commands.push(DrawCommand::Rect {
            x,
            y,
            w,
            h,
            color: color.to_string(),
        });
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: &str, alpha: f32) {
        self.commands.push(DrawCommand::Circle {
            x,
            y,
            radius,
            color: color.to_string(),
            alpha,
        });
    }
}
