//! Ordered effect compositing onto a fresh canvas.

use super::effects::{self, Effect, EffectContext, EffectError, BOOK_CONTENT};
use super::Canvas;
use crate::error::RenderError;
use crate::models::EffectInvocation;

/// One effect bound to its arguments.
pub struct PlanStep<'a> {
    pub effect: &'a dyn Effect,
    pub args: &'a [String],
}

impl PlanStep<'_> {
    /// ` -> id, a,b` as listed in the procedure output.
    pub fn procedure_line(&self) -> String {
        format!(" -> {}, {}", self.effect.identifier(), self.args.join(","))
    }
}

/// Effects in paint order, with identifiers already looked up.
pub struct PaintPlan<'a> {
    steps: Vec<PlanStep<'a>>,
}

impl<'a> PaintPlan<'a> {
    /// Look up every invocation and place `text` where the book content
    /// goes: at each `book-content` placeholder, or at the end when the
    /// list has none.
    pub fn resolve(invocations: &'a [EffectInvocation], text: &'a dyn Effect) -> Self {
        let mut placed = false;
        let mut steps: Vec<PlanStep<'a>> = invocations
            .iter()
            .map(|inv| {
                if inv.identifier == BOOK_CONTENT {
                    placed = true;
                    PlanStep {
                        effect: text,
                        args: &[],
                    }
                } else {
                    PlanStep {
                        effect: effects::lookup(&inv.identifier),
                        args: &inv.args,
                    }
                }
            })
            .collect();

        if !placed {
            steps.push(PlanStep {
                effect: text,
                args: &[],
            });
        }
        Self { steps }
    }

    pub fn steps(&self) -> &[PlanStep<'a>] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Finished canvas plus every diagnostic reported along the way.
pub struct Composition {
    pub canvas: Canvas,
    pub diagnostics: Vec<String>,
}

/// Paint `plan` onto an opaque black canvas.
///
/// Diagnostics are collected in order and painting continues. A fatal
/// effect error stops the render; whatever was drawn before it is lost
/// with the canvas.
pub fn composite(
    width: u32,
    height: u32,
    plan: &PaintPlan<'_>,
    ctx: &EffectContext<'_>,
) -> Result<Composition, RenderError> {
    let mut canvas = Canvas::new(width, height)?;
    let mut diagnostics = Vec::new();

    for step in plan.steps() {
        let identifier = step.effect.identifier();
        tracing::debug!(effect = identifier, args = ?step.args, "Applying effect");

        match step.effect.apply(&mut canvas, ctx, step.args) {
            Ok(()) => {}
            Err(EffectError::Diagnostic(message)) => {
                tracing::debug!(effect = identifier, %message, "Effect reported a problem");
                diagnostics.push(message);
            }
            Err(source) => {
                tracing::warn!(effect = identifier, %source, "Effect failed");
                return Err(RenderError::Composition {
                    effect: identifier.to_string(),
                    source,
                });
            }
        }
    }

    Ok(Composition {
        canvas,
        diagnostics,
    })
}
