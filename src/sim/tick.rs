//! Fixed timestep simulation tick
//!
//! A tick folds one input sample over the world through an ordered list of
//! stages. Each stage takes a snapshot and returns the next one; later stages
//! observe the effects of earlier ones within the same tick, so the order in
//! [`PIPELINE`] is part of the game rules.

use glam::Vec2;

use super::collision::Bounds;
use super::hash::{StringHash, fingerprint, letter_for, unit};
use super::state::{Alien, Bullet, Shooter, World, alien_grid, game_over_message};
use crate::consts::*;

/// Input sample for a single tick (latest value since the previous tick)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Pointer position in screen coordinates
    pub pointer: Option<Vec2>,
    /// Screen position of the play area's top-left corner
    pub play_origin: Vec2,
    /// Last key symbol pressed ("A".."Z", "Enter", ...)
    pub key: Option<String>,
}

impl TickInput {
    pub fn key(symbol: &str) -> Self {
        Self {
            key: Some(symbol.to_string()),
            ..Default::default()
        }
    }

    pub fn pointer(pos: Vec2) -> Self {
        Self {
            pointer: Some(pos),
            ..Default::default()
        }
    }

    /// The pressed key, if it is a single uppercase ASCII letter
    fn letter(&self) -> Option<char> {
        let key = self.key.as_deref()?;
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_uppercase() => Some(c),
            _ => None,
        }
    }
}

/// A single pipeline stage
pub type Stage = fn(World, &TickInput) -> World;

/// Stages applied to a running world, in order
pub const PIPELINE: [(&str, Stage); 12] = [
    ("player_shoot", player_shoot),
    ("alien_shoot", alien_shoot),
    ("move_player", move_player),
    ("move_aliens", move_aliens),
    ("move_bullets", move_bullets),
    ("remove_bullets", remove_bullets),
    ("player_alien_collision", player_alien_collision),
    ("player_bullet_collision", player_bullet_collision),
    ("alien_bullet_collision", alien_bullet_collision),
    ("shield_bullet_collision", shield_bullet_collision),
    ("no_more_aliens", no_more_aliens),
    ("ammo_regen", ammo_regen),
];

/// Advance the world by one fixed timestep
///
/// While stopped, only the start key does anything: it replaces the world
/// with a fresh running one seeded from the serialization of the stopped
/// world.
pub fn transition(state: &World, input: &TickInput) -> World {
    if !state.running {
        if input.key.as_deref() == Some(START_KEY) {
            let seed = state.fingerprint();
            log::info!("Starting new run (seed {} bytes)", seed.len());
            return World {
                running: true,
                ..World::new(&seed)
            };
        }
        return state.clone();
    }

    PIPELINE
        .iter()
        .fold(state.clone(), |world, (_, stage)| stage(world, input))
}

/// Fire the pressed letter from the player's cannon
pub fn player_shoot(mut state: World, input: &TickInput) -> World {
    let Some(letter) = input.letter() else {
        return state;
    };
    if state.ammo == 0 {
        return state;
    }

    let player = &state.player;
    let pos = Vec2::new(
        player.pos.x + player.width / 2.0 - BULLET_WIDTH / 2.0,
        player.pos.y - BULLET_HEIGHT,
    );
    state
        .bullets
        .push(Bullet::new(Shooter::Player, pos, PLAYER_BULLET_VEL, letter));
    state.ammo -= 1;
    state.score -= SHOOT_PENALTY;
    state
}

/// Let every alien roll for a shot
///
/// Each roll hashes the serialized world followed by the serialized alien,
/// so decisions are recomputed from scratch every frame. All rolls read the
/// stage's input snapshot; shots fired earlier in the stage do not feed into
/// later rolls.
pub fn alien_shoot(mut state: World, _input: &TickInput) -> World {
    let world_hash = StringHash::new().write(&state.fingerprint());

    let shots: Vec<Bullet> = state
        .aliens
        .iter()
        .filter_map(|alien| {
            let h = world_hash.write(&fingerprint(alien)).finish();
            if unit(h) >= ALIEN_SHOOT_PROBABILITY {
                return None;
            }
            let pos = alien.pos + Vec2::new(alien.width - BULLET_WIDTH, alien.height);
            Some(Bullet::new(Shooter::Alien, pos, ALIEN_BULLET_VEL, letter_for(h)))
        })
        .collect();

    if !shots.is_empty() {
        log::debug!("{} alien shot(s) fired", shots.len());
    }
    state.bullets.extend(shots);
    state
}

/// Follow the pointer horizontally, clamped to the play area
pub fn move_player(mut state: World, input: &TickInput) -> World {
    if let Some(pointer) = input.pointer {
        let x = pointer.x - input.play_origin.x - state.player.width / 2.0;
        state.player.pos.x = x.clamp(0.0, PLAY_WIDTH - state.player.width);
    }
    state
}

/// Move the alien grid, bouncing off the side walls
pub fn move_aliens(mut state: World, _input: &TickInput) -> World {
    if state.aliens.is_empty() {
        return state;
    }

    let vel = state.alien_vel;
    let left = state
        .aliens
        .iter()
        .map(|a| a.pos.x)
        .fold(f32::INFINITY, f32::min);
    let right = state
        .aliens
        .iter()
        .map(|a| a.pos.x + a.width)
        .fold(f32::NEG_INFINITY, f32::max);

    let snap = if left + vel.x < 0.0 {
        Some(-left)
    } else if right + vel.x > PLAY_WIDTH {
        Some(PLAY_WIDTH - right)
    } else {
        None
    };

    match snap {
        Some(dx) => {
            state.alien_vel.x = -vel.x;
            for alien in &mut state.aliens {
                alien.pos += Vec2::new(dx, ALIEN_DROP);
            }
        }
        None => {
            for alien in &mut state.aliens {
                alien.pos += vel;
            }
        }
    }
    state
}

pub fn move_bullets(mut state: World, _input: &TickInput) -> World {
    for bullet in &mut state.bullets {
        bullet.pos += bullet.vel;
    }
    state
}

/// Cull bullets that left through the top edge
///
/// Bullets past the bottom edge are left alone.
pub fn remove_bullets(mut state: World, _input: &TickInput) -> World {
    state.bullets.retain(|b| b.pos.y > 0.0);
    state
}

fn game_over(mut state: World) -> World {
    log::info!("Game over at level {} with score {}", state.level, state.score);
    state.running = false;
    state.message = game_over_message(state.score);
    state
}

pub fn player_alien_collision(state: World, _input: &TickInput) -> World {
    if state.aliens.iter().any(|a| state.player.overlaps(a)) {
        game_over(state)
    } else {
        state
    }
}

pub fn player_bullet_collision(state: World, _input: &TickInput) -> World {
    let hit = state
        .bullets
        .iter()
        .filter(|b| b.shooter != Shooter::Player)
        .any(|b| state.player.overlaps(b));
    if hit { game_over(state) } else { state }
}

/// Player bullets destroy aliens; matching letters score the bonus
///
/// Scoring counts every overlapping (alien, bullet) pair. Removal is
/// membership-based: an alien goes if any player bullet touches it, and a
/// bullet goes if it touches any alien.
pub fn alien_bullet_collision(mut state: World, _input: &TickInput) -> World {
    let hits = |alien: &Alien, bullet: &Bullet| {
        bullet.shooter != Shooter::Alien && alien.overlaps(bullet)
    };

    let mut gained = 0;
    for alien in &state.aliens {
        for bullet in state.bullets.iter().filter(|b| hits(alien, *b)) {
            gained += if alien.character == bullet.character {
                KILL_MATCH_BONUS
            } else {
                KILL_BONUS
            };
        }
    }
    if gained == 0 {
        return state;
    }

    let aliens = std::mem::take(&mut state.aliens);
    let bullets = std::mem::take(&mut state.bullets);
    state.bullets = bullets
        .iter()
        .filter(|b| !aliens.iter().any(|a| hits(a, *b)))
        .cloned()
        .collect();
    state.aliens = aliens
        .into_iter()
        .filter(|a| !bullets.iter().any(|b| hits(a, b)))
        .collect();
    state.score += gained;
    state
}

/// Bullets erode shields; hits from below also push the shield down
pub fn shield_bullet_collision(mut state: World, _input: &TickInput) -> World {
    let bullets = std::mem::take(&mut state.bullets);

    state.bullets = bullets
        .iter()
        .filter(|b| !state.shields.iter().any(|s| s.overlaps(*b)))
        .cloned()
        .collect();

    for shield in &mut state.shields {
        let count = |shooter: Shooter| {
            bullets
                .iter()
                .filter(|b| b.shooter == shooter && shield.overlaps(*b))
                .count() as f32
        };
        let from_player = count(Shooter::Player);
        let from_aliens = count(Shooter::Alien);
        shield.height -= SHIELD_EROSION * (from_player + from_aliens);
        shield.pos.y += SHIELD_EROSION * from_aliens;
    }
    state.shields.retain(|s| s.height > 0.0);
    state
}

/// Start the next level once every alien is destroyed
pub fn no_more_aliens(mut state: World, _input: &TickInput) -> World {
    if !state.aliens.is_empty() {
        return state;
    }

    state.aliens = alien_grid(&state.fingerprint());
    state.level += 1;
    state.alien_vel = state.alien_vel.abs() + ALIEN_VEL_INCREMENT;
    log::info!(
        "Level {} (alien velocity {:?})",
        state.level,
        state.alien_vel
    );
    state
}

pub fn ammo_regen(mut state: World, _input: &TickInput) -> World {
    state.ammo_regen_countdown = state.ammo_regen_countdown.saturating_sub(1);
    if state.ammo_regen_countdown == 0 {
        state.ammo = (state.ammo + AMMO_REGEN).min(AMMO_MAX);
        state.ammo_regen_countdown = AMMO_REGEN_PERIOD;
    }
    state
}
