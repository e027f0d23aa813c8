use std::f32::consts::{PI, TAU};

use eframe::egui::{Vec2, vec2};
use rand::Rng;
use rand::rngs::StdRng;

use super::{Bubble, Viewport};

const FILL_TARGET: f32 = 0.75;
const MIN_FILL_FRACTION: f32 = 0.01;
const MAX_RADIUS_FRACTION: f32 = 0.25;
const RADIUS_EASING: f32 = 0.05;
const RADIUS_SNAP: f32 = 0.1;
const DRAG_DAMPING: f32 = 0.95;
const WANDER_SPEED_MIN: f32 = 0.5;
const WANDER_SPEED_MAX: f32 = 2.0;
const COUNTDOWN_MIN: i32 = 60;
const COUNTDOWN_MAX: i32 = 120;
const VELOCITY_EASING: f32 = 0.02;
const BASE_DAMPING: f32 = 0.98;
const COMPACT_BASE_DAMPING: f32 = 0.97;
const SIZE_DAMPING: f32 = 0.04;
const FRICTION: f32 = 0.993;
const RESTITUTION: f32 = 0.8;
const COLLISION_MARGIN: f32 = 2.0;
const FLICK_IMPULSE: f32 = 2.0;
const COMPACT_FLICK_IMPULSE: f32 = 1.0;

pub(super) fn next_direction_countdown(rng: &mut StdRng) -> i32 {
    rng.gen_range(COUNTDOWN_MIN..=COUNTDOWN_MAX)
}

pub(super) fn step(bubbles: &mut [Bubble], viewport: Viewport, rng: &mut StdRng) {
    if bubbles.is_empty() {
        return;
    }

    fill_viewport(bubbles, viewport);

    let base_damping = if viewport.is_compact() {
        COMPACT_BASE_DAMPING
    } else {
        BASE_DAMPING
    };

    for bubble in bubbles.iter_mut() {
        ease_radius(bubble);

        if bubble.is_dragging {
            bubble.velocity *= DRAG_DAMPING;
            continue;
        }

        wander(bubble, rng);
        integrate(bubble, base_damping);
        reflect_off_bounds(bubble, viewport);
    }

    let impulse = if viewport.is_compact() {
        COMPACT_FLICK_IMPULSE
    } else {
        FLICK_IMPULSE
    };
    resolve_collisions(bubbles, impulse);
}

/// Grows every bubble uniformly while they cover less than the target share of the area.
fn fill_viewport(bubbles: &mut [Bubble], viewport: Viewport) {
    let area = viewport.area();
    if area <= 0.0 {
        return;
    }

    let covered = bubbles
        .iter()
        .map(|bubble| PI * bubble.radius * bubble.radius)
        .sum::<f32>();
    let filled = covered / area;
    if filled >= FILL_TARGET {
        return;
    }

    let scale = (FILL_TARGET / filled.max(MIN_FILL_FRACTION)).sqrt();
    let max_radius = viewport.min_dim() * MAX_RADIUS_FRACTION;
    for bubble in bubbles.iter_mut() {
        bubble.radius = (bubble.radius * scale).min(max_radius);
    }
}

fn ease_radius(bubble: &mut Bubble) {
    let gap = bubble.target_radius - bubble.radius;
    if gap.abs() < RADIUS_SNAP {
        bubble.radius = bubble.target_radius;
    } else {
        bubble.radius += gap * RADIUS_EASING;
    }
}

fn wander(bubble: &mut Bubble, rng: &mut StdRng) {
    bubble.direction_change_countdown -= 1;
    if bubble.direction_change_countdown > 0 {
        return;
    }

    let angle = rng.gen_range(0.0..TAU);
    let speed = rng.gen_range(WANDER_SPEED_MIN..=WANDER_SPEED_MAX);
    bubble.target_velocity = Vec2::angled(angle) * speed;
    bubble.direction_change_countdown = next_direction_countdown(rng);
}

fn integrate(bubble: &mut Bubble, base_damping: f32) {
    bubble.velocity += (bubble.target_velocity - bubble.velocity) * VELOCITY_EASING;

    let damping = base_damping - (bubble.radius / 50.0).min(1.0) * SIZE_DAMPING;
    bubble.velocity *= damping * FRICTION;
    bubble.position += bubble.velocity;
}

fn reflect_off_bounds(bubble: &mut Bubble, viewport: Viewport) {
    let radius = bubble.radius;

    if bubble.position.x - radius < 0.0 {
        bubble.position.x = radius;
        bubble.velocity.x = -bubble.velocity.x * RESTITUTION;
    } else if bubble.position.x + radius > viewport.width {
        bubble.position.x = viewport.width - radius;
        bubble.velocity.x = -bubble.velocity.x * RESTITUTION;
    }

    if bubble.position.y - radius < 0.0 {
        bubble.position.y = radius;
        bubble.velocity.y = -bubble.velocity.y * RESTITUTION;
    } else if bubble.position.y + radius > viewport.height {
        bubble.position.y = viewport.height - radius;
        bubble.velocity.y = -bubble.velocity.y * RESTITUTION;
    }
}

/// Pushes overlapping pairs apart. A dragged bubble never moves here but flicks its partner.
pub(super) fn resolve_collisions(bubbles: &mut [Bubble], impulse: f32) {
    let count = bubbles.len();
    for j in 1..count {
        let (head, tail) = bubbles.split_at_mut(j);
        let second = &mut tail[0];

        for first in head.iter_mut() {
            let delta = second.position - first.position;
            let distance = delta.length();
            let min_distance = first.radius + second.radius + COLLISION_MARGIN;
            if distance >= min_distance {
                continue;
            }

            let overlap = min_distance - distance;
            let angle = delta.y.atan2(delta.x);
            let direction = vec2(angle.cos(), angle.sin());
            let push = direction * (overlap * 0.5);

            if !first.is_dragging {
                first.position -= push;
            }
            if !second.is_dragging {
                second.position += push;
            }

            if first.is_dragging && !second.is_dragging {
                second.velocity += direction * impulse;
            } else if second.is_dragging && !first.is_dragging {
                first.velocity -= direction * impulse;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::Pos2;
    use rand::SeedableRng;

    use super::*;
    use crate::market::Instrument;

    fn bubble_at(symbol: &str, x: f32, y: f32, radius: f32) -> Bubble {
        let mut bubble = Bubble::new(
            &Instrument::new(symbol, symbol, 1.0, 0.0),
            Pos2::new(x, y),
            Vec2::ZERO,
            radius,
            90,
        );
        bubble.target_radius = radius;
        bubble
    }

    fn total_overlap(bubbles: &[Bubble]) -> f32 {
        let mut total = 0.0;
        for i in 0..bubbles.len() {
            for j in (i + 1)..bubbles.len() {
                let distance = bubbles[i].position.distance(bubbles[j].position);
                total += (bubbles[i].radius + bubbles[j].radius - distance).max(0.0);
            }
        }
        total
    }

    #[test]
    fn radius_eases_five_percent_then_snaps() {
        let mut bubble = bubble_at("AAA", 0.0, 0.0, 26.25);
        bubble.target_radius = 32.5;

        ease_radius(&mut bubble);
        assert!((bubble.radius - (26.25 + 6.25 * 0.05)).abs() < 1e-4);

        for _ in 0..200 {
            ease_radius(&mut bubble);
        }
        assert_eq!(bubble.radius, 32.5);
    }

    #[test]
    fn sparse_layout_is_scaled_up_to_cap() {
        let mut bubbles = vec![bubble_at("AAA", 100.0, 100.0, 30.0)];
        fill_viewport(&mut bubbles, Viewport::new(1000.0, 800.0));
        assert_eq!(bubbles[0].radius, 200.0);
    }

    #[test]
    fn fill_scale_uses_covered_fraction() {
        let viewport = Viewport::new(1000.0, 1000.0);
        let mut bubbles = (0..20)
            .map(|index| bubble_at(&format!("S{index}"), 500.0, 500.0, 40.0))
            .collect::<Vec<_>>();
        let filled = 20.0 * PI * 40.0 * 40.0 / viewport.area();

        fill_viewport(&mut bubbles, viewport);

        let expected = 40.0 * (FILL_TARGET / filled).sqrt();
        assert!((bubbles[0].radius - expected).abs() < 1e-3);
    }

    #[test]
    fn crowded_layout_is_left_alone() {
        let mut bubbles = (0..4)
            .map(|index| bubble_at(&format!("S{index}"), 50.0, 50.0, 50.0))
            .collect::<Vec<_>>();
        fill_viewport(&mut bubbles, Viewport::new(150.0, 150.0));
        assert!(bubbles.iter().all(|bubble| bubble.radius == 50.0));
    }

    #[test]
    fn wander_rerolls_target_when_countdown_expires() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut bubble = bubble_at("AAA", 0.0, 0.0, 20.0);
        bubble.direction_change_countdown = 2;

        wander(&mut bubble, &mut rng);
        assert_eq!(bubble.direction_change_countdown, 1);
        assert_eq!(bubble.target_velocity, Vec2::ZERO);

        wander(&mut bubble, &mut rng);
        let speed = bubble.target_velocity.length();
        assert!((WANDER_SPEED_MIN - 1e-4..=WANDER_SPEED_MAX + 1e-4).contains(&speed));
        assert!((COUNTDOWN_MIN..=COUNTDOWN_MAX).contains(&bubble.direction_change_countdown));
    }

    #[test]
    fn integration_eases_toward_target_and_damps_by_size() {
        let mut small = bubble_at("AAA", 10.0, 10.0, 10.0);
        small.velocity = vec2(1.0, 0.0);
        small.target_velocity = vec2(2.0, 0.0);
        integrate(&mut small, BASE_DAMPING);

        let eased = 1.0 + (2.0 - 1.0) * VELOCITY_EASING;
        let expected = eased * (BASE_DAMPING - 0.2 * SIZE_DAMPING) * FRICTION;
        assert!((small.velocity.x - expected).abs() < 1e-5);
        assert!((small.position.x - (10.0 + expected)).abs() < 1e-5);

        let mut large = bubble_at("BBB", 10.0, 10.0, 80.0);
        large.velocity = vec2(1.0, 0.0);
        large.target_velocity = vec2(1.0, 0.0);
        integrate(&mut large, COMPACT_BASE_DAMPING);
        let expected = (COMPACT_BASE_DAMPING - SIZE_DAMPING) * FRICTION;
        assert!((large.velocity.x - expected).abs() < 1e-5);
    }

    #[test]
    fn bounce_clamps_and_loses_energy() {
        let viewport = Viewport::new(400.0, 300.0);
        let mut bubble = bubble_at("AAA", -5.0, 295.0, 20.0);
        bubble.velocity = vec2(-3.0, 2.0);

        reflect_off_bounds(&mut bubble, viewport);

        assert_eq!(bubble.position, Pos2::new(20.0, 280.0));
        assert!((bubble.velocity.x - 2.4).abs() < 1e-5);
        assert!((bubble.velocity.y + 1.6).abs() < 1e-5);
    }

    #[test]
    fn collisions_split_overlap_evenly() {
        let mut bubbles = vec![
            bubble_at("AAA", 100.0, 100.0, 20.0),
            bubble_at("BBB", 130.0, 100.0, 20.0),
        ];

        resolve_collisions(&mut bubbles, FLICK_IMPULSE);

        let overlap = 42.0 - 30.0;
        assert!((bubbles[0].position.x - (100.0 - overlap / 2.0)).abs() < 1e-4);
        assert!((bubbles[1].position.x - (130.0 + overlap / 2.0)).abs() < 1e-4);
        assert_eq!(bubbles[0].velocity, Vec2::ZERO);
        assert_eq!(bubbles[1].velocity, Vec2::ZERO);
    }

    #[test]
    fn dragged_bubble_flicks_its_neighbour() {
        let mut bubbles = vec![
            bubble_at("AAA", 100.0, 100.0, 20.0),
            bubble_at("BBB", 100.0, 130.0, 20.0),
        ];
        bubbles[0].is_dragging = true;

        resolve_collisions(&mut bubbles, COMPACT_FLICK_IMPULSE);

        assert_eq!(bubbles[0].position, Pos2::new(100.0, 100.0));
        assert!((bubbles[1].position.y - 136.0).abs() < 1e-4);
        assert!((bubbles[1].velocity.y - COMPACT_FLICK_IMPULSE).abs() < 1e-5);
        assert!(bubbles[1].velocity.x.abs() < 1e-5);

        bubbles[0].is_dragging = false;
        bubbles[1].is_dragging = true;
        bubbles[0].position = Pos2::new(100.0, 110.0);
        resolve_collisions(&mut bubbles, FLICK_IMPULSE);
        assert!((bubbles[0].velocity.y + FLICK_IMPULSE).abs() < 1e-5);
    }

    #[test]
    fn repeated_collision_passes_reduce_overlap() {
        let mut bubbles = (0..8)
            .map(|index| {
                let jitter = index as f32 * 3.0;
                bubble_at(&format!("S{index}"), 500.0 + jitter, 500.0 - jitter * 0.5, 40.0)
            })
            .collect::<Vec<_>>();

        let initial = total_overlap(&bubbles);
        for _ in 0..10 {
            resolve_collisions(&mut bubbles, FLICK_IMPULSE);
        }
        let after_ten = total_overlap(&bubbles);
        for _ in 0..40 {
            resolve_collisions(&mut bubbles, FLICK_IMPULSE);
        }
        let after_fifty = total_overlap(&bubbles);

        assert!(after_ten < initial);
        assert!(after_fifty <= after_ten);
        assert!(after_fifty < initial * 0.25);
    }

    #[test]
    fn dragged_bubble_is_not_integrated() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut bubbles = vec![bubble_at("AAA", 300.0, 300.0, 30.0)];
        bubbles[0].is_dragging = true;
        bubbles[0].velocity = vec2(4.0, -2.0);

        step(&mut bubbles, Viewport::new(1000.0, 1000.0), &mut rng);

        assert_eq!(bubbles[0].position, Pos2::new(300.0, 300.0));
        assert!((bubbles[0].velocity.x - 4.0 * DRAG_DAMPING).abs() < 1e-5);
        assert_eq!(bubbles[0].direction_change_countdown, 90);
    }
}
