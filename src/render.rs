//! Turn paint state and tracker data into draw commands.
//!
//! Nothing here touches pixels: these are pure functions of their inputs, so
//! rendering the same buffer twice yields the same commands. `draw.rs`
//! executes the commands into a framebuffer.

use crate::paint::{ColorMap, PaintBuffer};
use crate::tracker::{FINGERTIPS, Snapshot};
use crate::types::{Canvas, Point, Rgb};

/// Landmark that gets the highlighted ring: index fingertip of hand 0.
pub const HIGHLIGHT_LANDMARK: (usize, usize) = (0, 8);
const HIGHLIGHT_DIAMETER: f32 = 40.0;
const HIGHLIGHT_STROKE: f32 = 5.0;
const LANDMARK_DIAMETER: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Rgb,
    pub weight: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub diameter: f32,
    pub fill: Option<Rgb>,
    pub stroke: Option<Stroke>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCmd {
    /// Wipe the whole canvas.
    Background(Rgb),
    /// Current camera frame, mirrored, blended over the background by `opacity`.
    Video { opacity: f32 },
    Circle(Circle),
}

/// One filled, unstroked circle per dot, oldest first.
pub fn render_dots(buffer: &PaintBuffer, colors: &ColorMap, canvas: Canvas, out: &mut Vec<DrawCmd>) {
    out.extend(buffer.dots().iter().map(|dot| {
        DrawCmd::Circle(Circle {
            center: canvas.mirror(dot.at),
            diameter: dot.radius,
            fill: Some(colors.get(dot.hand, dot.finger).unwrap_or(Rgb::WHITE)),
            stroke: None,
        })
    }));
}

/// Every landmark of every hand. Fingertips take their finger's color when the
/// hand has colors; the index fingertip of hand 0 gets a wide white ring.
pub fn render_landmarks(snapshot: Option<&Snapshot>, colors: &ColorMap, canvas: Canvas, out: &mut Vec<DrawCmd>) {
    let Some(snapshot) = snapshot else { return };

    for (hand, state) in snapshot.hands.iter().enumerate() {
        for (index, &p) in state.landmarks.iter().enumerate() {
            let fill = FINGERTIPS
                .iter()
                .position(|&tip| tip == index)
                .and_then(|finger| colors.get(hand, finger))
                .unwrap_or(Rgb::WHITE);

            let (diameter, stroke) = if (hand, index) == HIGHLIGHT_LANDMARK {
                (HIGHLIGHT_DIAMETER, Some(Stroke { color: Rgb::WHITE, weight: HIGHLIGHT_STROKE }))
            } else {
                (LANDMARK_DIAMETER, None)
            };

            out.push(DrawCmd::Circle(Circle {
                center: canvas.mirror(p),
                diameter,
                fill: Some(fill),
                stroke,
            }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::{FingerPinch, HandState, LANDMARKS, PinchPhase};
    use crate::types::NormPoint;
    use pretty_assertions::assert_eq;

    const CANVAS: Canvas = Canvas::DEFAULT;

    fn circles(cmds: &[DrawCmd]) -> Vec<Circle> {
        cmds.iter()
            .filter_map(|c| match c {
                DrawCmd::Circle(c) => Some(*c),
                _ => None,
            })
            .collect()
    }

    fn hand_with(points: Vec<NormPoint>) -> HandState {
        HandState { pinch: [None; 4], landmarks: points }
    }

    #[test]
    fn mirror_endpoints_and_midpoint() {
        assert_eq!(CANVAS.mirror(NormPoint::new(0.0, 0.0)), Point { x: 640.0, y: 0.0 });
        assert_eq!(CANVAS.mirror(NormPoint::new(1.0, 1.0)), Point { x: 0.0, y: 480.0 });
        assert_eq!(CANVAS.mirror(NormPoint::new(0.5, 0.5)), Point { x: 320.0, y: 240.0 });
    }

    #[test]
    fn mirror_is_decreasing_and_linear() {
        let xs: Vec<f32> = (0..=10).map(|i| CANVAS.mirror(NormPoint::new(i as f32 / 10.0, 0.0)).x).collect();
        for pair in xs.windows(2) {
            assert!(pair[1] < pair[0]);
            assert!((pair[0] - pair[1] - 64.0).abs() < 1e-3);
        }
    }

    #[test]
    fn dot_rendered_mirrored_with_its_color() {
        let mut buf = PaintBuffer::new();
        let snap = Snapshot {
            hands: vec![HandState {
                pinch: [Some(FingerPinch { phase: PinchPhase::Held, at: Some(NormPoint::new(0.5, 0.5)) }), None, None, None],
                landmarks: Vec::new(),
            }],
        };
        buf.update(Some(&snap));

        let colors = ColorMap::default();
        let mut out = Vec::new();
        render_dots(&buf, &colors, CANVAS, &mut out);

        assert_eq!(
            out,
            vec![DrawCmd::Circle(Circle {
                center: Point { x: 320.0, y: 240.0 },
                diameter: 40.0,
                fill: colors.get(0, 0),
                stroke: None,
            })]
        );
    }

    #[test]
    fn rendering_twice_is_identical() {
        let mut buf = PaintBuffer::new();
        let snap = Snapshot {
            hands: vec![
                HandState {
                    pinch: [None, Some(FingerPinch { phase: PinchPhase::Held, at: Some(NormPoint::new(0.1, 0.9)) }), None, None],
                    landmarks: Vec::new(),
                },
                HandState {
                    pinch: [Some(FingerPinch { phase: PinchPhase::Held, at: Some(NormPoint::new(0.7, 0.3)) }), None, None, None],
                    landmarks: Vec::new(),
                },
            ],
        };
        for _ in 0..3 {
            buf.update(Some(&snap));
        }

        let colors = ColorMap::default();
        let (mut a, mut b) = (Vec::new(), Vec::new());
        render_dots(&buf, &colors, CANVAS, &mut a);
        render_dots(&buf, &colors, CANVAS, &mut b);
        assert_eq!(a.len(), 6);
        assert_eq!(a, b);
    }

    #[test]
    fn highlighted_index_tip_on_hand_zero() {
        let mut points = vec![NormPoint::new(0.5, 0.5); LANDMARKS];
        points[8] = NormPoint::new(0.2, 0.3);
        let snap = Snapshot { hands: vec![hand_with(points)] };

        let colors = ColorMap::default();
        let mut out = Vec::new();
        render_landmarks(Some(&snap), &colors, CANVAS, &mut out);
        let drawn = circles(&out);

        assert_eq!(drawn.len(), LANDMARKS);
        assert_eq!(
            drawn[8],
            Circle {
                center: Point { x: 512.0, y: 144.0 },
                diameter: 40.0,
                fill: colors.get(0, 0),
                stroke: Some(Stroke { color: Rgb::WHITE, weight: 5.0 }),
            }
        );
    }

    #[test]
    fn fingertips_colored_rest_white() {
        let points = vec![NormPoint::new(0.5, 0.5); LANDMARKS];
        let snap = Snapshot { hands: vec![hand_with(points.clone()), hand_with(points)] };

        let colors = ColorMap::default();
        let mut out = Vec::new();
        render_landmarks(Some(&snap), &colors, CANVAS, &mut out);
        let drawn = circles(&out);
        let hand1 = &drawn[LANDMARKS..];

        for (finger, &tip) in FINGERTIPS.iter().enumerate() {
            assert_eq!(hand1[tip].fill, colors.get(1, finger));
            assert_eq!(hand1[tip].stroke, None);
            assert_eq!(hand1[tip].diameter, 10.0);
        }
        assert_eq!(hand1[0].fill, Some(Rgb::WHITE));
        assert_eq!(hand1[4].fill, Some(Rgb::WHITE));
        // Only hand 0 gets the ring.
        assert_eq!(hand1[8].stroke, None);
        assert!(drawn[8].stroke.is_some());
    }

    #[test]
    fn hand_without_colors_is_all_white() {
        let points = vec![NormPoint::new(0.5, 0.5); LANDMARKS];
        let snap = Snapshot { hands: vec![hand_with(Vec::new()), hand_with(Vec::new()), hand_with(points)] };

        let mut out = Vec::new();
        render_landmarks(Some(&snap), &ColorMap::default(), CANVAS, &mut out);
        let drawn = circles(&out);

        assert_eq!(drawn.len(), LANDMARKS);
        assert!(drawn.iter().all(|c| c.fill == Some(Rgb::WHITE)));
    }

    #[test]
    fn no_landmarks_no_draws() {
        let mut out = Vec::new();
        render_landmarks(None, &ColorMap::default(), CANVAS, &mut out);
        render_landmarks(Some(&Snapshot::default()), &ColorMap::default(), CANVAS, &mut out);
        assert!(out.is_empty());
    }
}
