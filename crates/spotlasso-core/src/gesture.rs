//! Translation of drawing-surface gestures into region operations.

use crate::error::SelectResult;
use crate::region::RegionId;
use crate::selector::RegionSet;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Gesture callbacks emitted by the drawing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GestureEvent {
    /// The user started drawing a polygon.
    DrawStart,
    /// A vertex was placed on the polygon being drawn.
    DrawVertex(Point),
    /// The polygon was closed. An empty list means "use the placed vertices".
    DrawEnd(Vec<Point>),
    /// Drawing was abandoned (e.g. Escape).
    DrawAbort,
    /// An existing polygon was dragged into a new shape.
    ModifyEnd {
        region: RegionId,
        vertices: Vec<Point>,
    },
}

/// What a handled gesture did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    DraftStarted,
    VertexAdded,
    Created(RegionId),
    Reshaped(RegionId),
    Aborted,
    /// The gesture did not change anything.
    Ignored,
}

/// Routes gestures to a [`RegionSet`].
///
/// Holds no state of its own; whether a draw is open is always read from
/// the session via [`RegionSet::is_drafting`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GestureAdapter;

impl GestureAdapter {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(
        &self,
        regions: &mut RegionSet,
        event: GestureEvent,
    ) -> SelectResult<GestureOutcome> {
        match event {
            GestureEvent::DrawStart => {
                regions.begin_draw()?;
                Ok(GestureOutcome::DraftStarted)
            }
            GestureEvent::DrawVertex(point) => {
                regions.add_draft_vertex(point)?;
                Ok(GestureOutcome::VertexAdded)
            }
            GestureEvent::DrawEnd(vertices) => {
                let id = if vertices.is_empty() {
                    regions.commit_draft()?
                } else {
                    regions.commit(vertices)?
                };
                Ok(GestureOutcome::Created(id))
            }
            GestureEvent::DrawAbort => {
                if regions.cancel_draw() {
                    Ok(GestureOutcome::Aborted)
                } else {
                    Ok(GestureOutcome::Ignored)
                }
            }
            GestureEvent::ModifyEnd { region, vertices } => {
                regions.reshape(region, vertices)?;
                Ok(GestureOutcome::Reshaped(region))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SelectError;
    use crate::template::{Spot, SpotTemplate};

    fn session() -> RegionSet {
        let mut set = RegionSet::default();
        set.load_template(
            SpotTemplate::new(vec![
                Spot::new(0, 0.0, 0.0),
                Spot::new(1, 1.0, 0.0),
                Spot::new(2, 0.0, 1.0),
                Spot::new(3, 10.0, 10.0),
            ])
            .unwrap(),
        );
        set
    }

    fn square(min: f64, max: f64) -> Vec<Point> {
        vec![
            Point::new(min, min),
            Point::new(max, min),
            Point::new(max, max),
            Point::new(min, max),
        ]
    }

    #[test]
    fn test_draw_then_modify() {
        let mut set = session();
        let adapter = GestureAdapter::new();

        assert_eq!(
            adapter.handle(&mut set, GestureEvent::DrawStart),
            Ok(GestureOutcome::DraftStarted)
        );
        assert!(set.is_drafting());
        let Ok(GestureOutcome::Created(id)) =
            adapter.handle(&mut set, GestureEvent::DrawEnd(square(-0.5, 1.5)))
        else {
            panic!("expected a created region");
        };
        assert!(!set.is_drafting());
        assert_eq!(set.region(id).unwrap().owned_ids(), &[0, 1, 2]);

        let outcome = adapter.handle(
            &mut set,
            GestureEvent::ModifyEnd {
                region: id,
                vertices: square(-0.5, 0.5),
            },
        );
        assert_eq!(outcome, Ok(GestureOutcome::Reshaped(id)));
        assert_eq!(set.region(id).unwrap().owned_ids(), &[0]);
    }

    #[test]
    fn test_draw_from_vertices() {
        let mut set = session();
        let adapter = GestureAdapter::new();
        adapter.handle(&mut set, GestureEvent::DrawStart).unwrap();
        for p in square(9.0, 11.0) {
            assert_eq!(
                adapter.handle(&mut set, GestureEvent::DrawVertex(p)),
                Ok(GestureOutcome::VertexAdded)
            );
        }
        let Ok(GestureOutcome::Created(id)) =
            adapter.handle(&mut set, GestureEvent::DrawEnd(Vec::new()))
        else {
            panic!("expected a created region");
        };
        assert_eq!(set.region(id).unwrap().owned_ids(), &[3]);
    }

    #[test]
    fn test_second_draw_start_rejected() {
        let mut set = session();
        let adapter = GestureAdapter::new();
        adapter.handle(&mut set, GestureEvent::DrawStart).unwrap();
        assert_eq!(
            adapter.handle(&mut set, GestureEvent::DrawStart),
            Err(SelectError::AlreadyDrafting)
        );
    }

    #[test]
    fn test_abort() {
        let mut set = session();
        let adapter = GestureAdapter::new();
        assert_eq!(
            adapter.handle(&mut set, GestureEvent::DrawAbort),
            Ok(GestureOutcome::Ignored)
        );
        adapter.handle(&mut set, GestureEvent::DrawStart).unwrap();
        assert_eq!(
            adapter.handle(&mut set, GestureEvent::DrawAbort),
            Ok(GestureOutcome::Aborted)
        );
        assert!(!set.is_drafting());
        assert!(set.is_empty());
    }

    #[test]
    fn test_modify_during_draft_keeps_draft() {
        let mut set = session();
        let adapter = GestureAdapter::new();
        adapter.handle(&mut set, GestureEvent::DrawStart).unwrap();
        let Ok(GestureOutcome::Created(id)) =
            adapter.handle(&mut set, GestureEvent::DrawEnd(square(0.0, 1.0)))
        else {
            panic!("expected a created region");
        };

        adapter.handle(&mut set, GestureEvent::DrawStart).unwrap();
        let outcome = adapter.handle(
            &mut set,
            GestureEvent::ModifyEnd {
                region: id,
                vertices: square(9.0, 11.0),
            },
        );
        assert_eq!(outcome, Ok(GestureOutcome::Reshaped(id)));
        assert!(set.is_drafting());
        assert!(set.is_drafting());
    }

    #[test]
    fn test_draw_state_follows_session() {
        let mut set = session();
        let adapter = GestureAdapter::new();
        adapter.handle(&mut set, GestureEvent::DrawStart).unwrap();

        set.load_spots(vec![Spot::new(0, 0.0, 0.0)]).unwrap();
        assert!(!set.is_drafting());
        assert!(matches!(
            adapter.handle(&mut set, GestureEvent::DrawEnd(Vec::new())),
            Err(SelectError::InvalidState(_))
        ));

        set.begin_draw().unwrap();
        assert_eq!(
            adapter.handle(&mut set, GestureEvent::DrawStart),
            Err(SelectError::AlreadyDrafting)
        );
        let outcome = adapter.handle(&mut set, GestureEvent::DrawEnd(square(-1.0, 1.0)));
        assert!(matches!(outcome, Ok(GestureOutcome::Created(_))));
        assert!(!set.is_drafting());
    }

    #[test]
    fn test_modify_unknown_region() {
        let mut set = session();
        let adapter = GestureAdapter::new();
        let result = adapter.handle(
            &mut set,
            GestureEvent::ModifyEnd {
                region: RegionId(77),
                vertices: square(0.0, 1.0),
            },
        );
        assert_eq!(result, Err(SelectError::NotFound(RegionId(77))));
    }
}
