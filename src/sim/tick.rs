//! Per-frame simulation step
//!
//! One `tick` runs per scheduled animation frame. Speeds are expressed in
//! canvas units per tick.

use rand::Rng;

use super::collision::rects_overlap;
use super::state::{GameEvent, GamePhase, GameState, Rect, Shot, Tint};
use crate::consts::*;

/// Control intents for a single tick.
///
/// `move_left`/`move_right` mirror held keys; the rest are edge-triggered
/// and must be set for exactly one tick per key press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
    pub pause: bool,
    pub start: bool,
}

/// Advance the game by one tick.
pub fn tick(state: &mut GameState, input: &TickInput) {
    match state.phase {
        // Inert until init resolves; terminal after game over.
        GamePhase::Loading | GamePhase::GameOver => return,
        GamePhase::Menu => {
            if input.start {
                state.phase = GamePhase::Playing;
                state.events.push(GameEvent::Started);
            }
            return;
        }
        GamePhase::Paused => {
            if input.pause {
                state.phase = GamePhase::Playing;
            }
            return;
        }
        GamePhase::Playing => {}
    }

    if input.pause {
        state.phase = GamePhase::Paused;
        return;
    }

    state.time_ticks += 1;

    if input.fire {
        fire_player_shot(state);
    }

    update_player(state, input);
    update_enemies(state);
    update_shots(state);
    resolve_collisions(state);
    check_round_conditions(state);
}

/// Spawn one ascending shot centered on the player, costing one unit of
/// ammunition. Silently ignored when the magazine is empty.
fn fire_player_shot(state: &mut GameState) {
    if state.ammunition == 0 {
        return;
    }
    let player = &state.player.rect;
    state.shots.push(Shot {
        rect: Rect::new(
            player.pos.x + player.size.x / 2.0 - SHOT_WIDTH / 2.0,
            player.pos.y,
            SHOT_WIDTH,
            SHOT_HEIGHT,
        ),
        speed: PLAYER_SHOT_SPEED,
        tint: Tint::PlayerShot,
    });
    state.ammunition -= 1;
}

fn update_player(state: &mut GameState, input: &TickInput) {
    let player = &mut state.player;
    if input.move_left {
        player.rect.pos.x -= player.speed;
    }
    if input.move_right {
        player.rect.pos.x += player.speed;
    }
    player.rect.pos.x = player.rect.pos.x.clamp(0.0, CANVAS_WIDTH - player.rect.size.x);
}

/// March the formation: a touch on either canvas side flips every member
/// and steps the whole body down, then each member advances horizontally
/// and rolls its fire chance.
fn update_enemies(state: &mut GameState) {
    let GameState {
        enemies,
        enemy_shots,
        rng,
        cfg,
        game_speed,
        ..
    } = state;

    let bounce = enemies
        .iter()
        .any(|e| e.rect.pos.x <= 0.0 || e.rect.pos.x >= CANVAS_WIDTH - e.rect.size.x);

    for enemy in enemies.iter_mut() {
        if bounce {
            enemy.dir = -enemy.dir;
            enemy.rect.pos.y += FORMATION_DESCENT;
        }
        enemy.rect.pos.x += enemy.speed * enemy.dir * *game_speed;

        if rng.random::<f32>() < cfg.enemy_fire_chance {
            enemy_shots.push(Shot {
                rect: Rect::new(
                    enemy.rect.pos.x + enemy.rect.size.x / 2.0 - SHOT_WIDTH / 2.0,
                    enemy.rect.pos.y + enemy.rect.size.y,
                    SHOT_WIDTH,
                    SHOT_HEIGHT,
                ),
                speed: ENEMY_SHOT_SPEED,
                tint: Tint::EnemyShot,
            });
        }
    }
}

/// Advance both projectile lists and cull whatever left the canvas.
fn update_shots(state: &mut GameState) {
    state.shots.retain_mut(|shot| {
        shot.rect.pos.y -= shot.speed;
        shot.rect.pos.y > 0.0
    });
    state.enemy_shots.retain_mut(|shot| {
        shot.rect.pos.y += shot.speed;
        shot.rect.pos.y < CANVAS_HEIGHT
    });
}

fn resolve_collisions(state: &mut GameState) {
    // Player shots against the formation. Each shot destroys at most one
    // enemy; both are removed on a hit.
    let mut i = 0;
    while i < state.shots.len() {
        let shot_rect = state.shots[i].rect;
        match state
            .enemies
            .iter()
            .position(|e| rects_overlap(&shot_rect, &e.rect))
        {
            Some(hit) => {
                state.enemies.remove(hit);
                state.shots.remove(i);
                let awarded = (state.cfg.kill_score as f32 * state.multiplier).floor() as u32;
                state.score += u64::from(awarded);
                state.events.push(GameEvent::EnemyDestroyed { awarded });
            }
            None => i += 1,
        }
    }

    // Enemy fire against the player. At most one hit lands per tick.
    if let Some(hit) = state
        .enemy_shots
        .iter()
        .position(|s| rects_overlap(&s.rect, &state.player.rect))
    {
        state.enemy_shots.remove(hit);
        state.lives = state.lives.saturating_sub(1);
        state.events.push(GameEvent::LifeLost {
            remaining: state.lives,
        });
        if state.lives == 0 {
            end_game(state);
            return;
        }
    }

    // Direct contact ends the run outright.
    if state
        .enemies
        .iter()
        .any(|e| rects_overlap(&e.rect, &state.player.rect))
    {
        end_game(state);
    }
}

fn check_round_conditions(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        return;
    }

    // Cleared formation: next level, faster march, fresh grid. Shots in
    // flight carry over.
    if state.enemies.is_empty() {
        state.level += 1;
        state.game_speed += state.cfg.speed_step;
        state.spawn_formation();
        state.events.push(GameEvent::LevelUp { level: state.level });
    }

    if state.enemies.iter().any(|e| e.rect.pos.y >= INVASION_LINE) {
        end_game(state);
    }
}

fn end_game(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    state.events.push(GameEvent::GameOver { score: state.score });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    /// Playing-state fixture with enemy fire silenced so shot and life
    /// counts stay deterministic.
    fn playing_state() -> GameState {
        let cfg = GameConfig {
            enemy_fire_chance: 0.0,
            ..GameConfig::default()
        };
        let mut state = GameState::new(cfg, 7);
        state.finish_loading(100, 1.0);
        tick(&mut state, &TickInput { start: true, ..Default::default() });
        assert_eq!(state.phase, GamePhase::Playing);
        state.events.clear();
        state
    }

    #[test]
    fn start_intent_leaves_menu_and_emits_started() {
        let mut state = GameState::new(GameConfig::default(), 7);
        state.finish_loading(100, 1.0);
        assert_eq!(state.phase, GamePhase::Menu);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Menu);

        tick(&mut state, &TickInput { start: true, ..Default::default() });
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.events.contains(&GameEvent::Started));
    }

    #[test]
    fn pause_toggles_only_between_playing_and_paused() {
        let mut state = GameState::new(GameConfig::default(), 7);
        state.finish_loading(100, 1.0);

        // No-op from the menu
        tick(&mut state, &TickInput { pause: true, ..Default::default() });
        assert_eq!(state.phase, GamePhase::Menu);

        tick(&mut state, &TickInput { start: true, ..Default::default() });
        let pause = TickInput { pause: true, ..Default::default() };
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Paused);
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn tick_is_inert_while_loading() {
        let mut state = GameState::new(GameConfig::default(), 7);
        tick(&mut state, &TickInput { start: true, fire: true, ..Default::default() });
        assert_eq!(state.phase, GamePhase::Loading);
        assert_eq!(state.time_ticks, 0);
        assert!(state.shots.is_empty());
    }

    #[test]
    fn fire_spawns_one_centered_shot_and_spends_ammo() {
        let mut state = playing_state();
        state.ammunition = 5;
        state.player.rect.pos.x = 100.0;

        let player_y = state.player.rect.pos.y;
        tick(&mut state, &TickInput { fire: true, ..Default::default() });

        assert_eq!(state.shots.len(), 1);
        assert_eq!(state.ammunition, 4);
        // Centered on the player: 100 + 25 - 2; already advanced one tick
        assert_eq!(state.shots[0].rect.pos.x, 123.0);
        assert_eq!(state.shots[0].rect.pos.y, player_y - PLAYER_SHOT_SPEED);
    }

    #[test]
    fn fire_without_ammo_is_ignored() {
        let mut state = playing_state();
        state.ammunition = 0;
        tick(&mut state, &TickInput { fire: true, ..Default::default() });
        assert!(state.shots.is_empty());
        assert_eq!(state.ammunition, 0);
    }

    #[test]
    fn fire_in_menu_is_ignored() {
        let mut state = GameState::new(GameConfig::default(), 7);
        state.finish_loading(100, 1.0);
        tick(&mut state, &TickInput { fire: true, ..Default::default() });
        assert!(state.shots.is_empty());
        assert_eq!(state.ammunition, 100);
    }

    #[test]
    fn player_shots_ascend_and_expire_at_the_top() {
        let mut state = playing_state();
        // x = 140 sits in the gap between formation columns
        state.shots.push(Shot {
            rect: Rect::new(140.0, 100.0, SHOT_WIDTH, SHOT_HEIGHT),
            speed: 5.0,
            tint: Tint::PlayerShot,
        });
        state.shots.push(Shot {
            rect: Rect::new(140.0, 4.0, SHOT_WIDTH, SHOT_HEIGHT),
            speed: 5.0,
            tint: Tint::PlayerShot,
        });

        tick(&mut state, &TickInput::default());
        assert_eq!(state.shots.len(), 1);
        assert_eq!(state.shots[0].rect.pos.y, 95.0);
    }

    #[test]
    fn enemy_shots_descend_and_expire_at_the_bottom() {
        let mut state = playing_state();
        // Away from the player so nothing lands
        state.enemy_shots.push(Shot {
            rect: Rect::new(20.0, 300.0, SHOT_WIDTH, SHOT_HEIGHT),
            speed: 3.0,
            tint: Tint::EnemyShot,
        });
        state.enemy_shots.push(Shot {
            rect: Rect::new(20.0, 598.0, SHOT_WIDTH, SHOT_HEIGHT),
            speed: 3.0,
            tint: Tint::EnemyShot,
        });

        tick(&mut state, &TickInput::default());
        assert_eq!(state.enemy_shots.len(), 1);
        assert_eq!(state.enemy_shots[0].rect.pos.y, 303.0);
    }

    #[test]
    fn player_is_clamped_to_the_canvas() {
        let mut state = playing_state();

        state.player.rect.pos.x = 0.0;
        tick(&mut state, &TickInput { move_left: true, ..Default::default() });
        assert_eq!(state.player.rect.pos.x, 0.0);

        state.player.rect.pos.x = 795.0;
        tick(&mut state, &TickInput { move_right: true, ..Default::default() });
        assert_eq!(state.player.rect.pos.x, 750.0);
    }

    #[test]
    fn edge_touch_flips_and_descends_the_whole_formation() {
        let mut state = playing_state();
        let before: Vec<f32> = state.enemies.iter().map(|e| e.rect.pos.y).collect();
        state.enemies[9].rect.pos.x = CANVAS_WIDTH - ENEMY_WIDTH;

        tick(&mut state, &TickInput::default());

        for (enemy, y0) in state.enemies.iter().zip(before) {
            assert_eq!(enemy.dir, -1.0);
            assert_eq!(enemy.rect.pos.y, y0 + FORMATION_DESCENT);
        }
    }

    #[test]
    fn shot_kills_award_multiplied_score() {
        let mut state = playing_state();
        state.multiplier = 1.4;
        let target = state.enemies[0].rect;
        // One tick of travel above the target keeps the overlap exact
        state.shots.push(Shot {
            rect: Rect::new(target.pos.x + 13.0, target.pos.y + PLAYER_SHOT_SPEED, SHOT_WIDTH, SHOT_HEIGHT),
            speed: PLAYER_SHOT_SPEED,
            tint: Tint::PlayerShot,
        });

        tick(&mut state, &TickInput::default());
        assert_eq!(state.enemies.len(), 49);
        assert!(state.shots.is_empty());
        assert_eq!(state.score, 140);
        assert!(state.events.contains(&GameEvent::EnemyDestroyed { awarded: 140 }));
    }

    #[test]
    fn enemy_shot_costs_a_life_then_the_run() {
        let mut state = playing_state();
        state.lives = 2;
        let player = state.player.rect;
        let on_player = Shot {
            rect: Rect::new(player.pos.x + 10.0, player.pos.y - ENEMY_SHOT_SPEED + 1.0, SHOT_WIDTH, SHOT_HEIGHT),
            speed: ENEMY_SHOT_SPEED,
            tint: Tint::EnemyShot,
        };

        state.enemy_shots.push(on_player.clone());
        tick(&mut state, &TickInput::default());
        assert_eq!(state.lives, 1);
        assert!(state.enemy_shots.is_empty());
        assert_eq!(state.phase, GamePhase::Playing);

        state.enemy_shots.push(on_player);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);

        // Terminal: further ticks change nothing
        let ticks = state.time_ticks;
        tick(&mut state, &TickInput { start: true, pause: true, ..Default::default() });
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn enemy_contact_ends_the_run() {
        let mut state = playing_state();
        let player_pos = state.player.rect.pos;
        state.enemies[0].rect.pos = player_pos;

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn invasion_line_ends_the_run() {
        let mut state = playing_state();
        state.enemies[0].rect.pos.y = INVASION_LINE;

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(matches!(
            state.events.last(),
            Some(GameEvent::GameOver { .. })
        ));
    }

    #[test]
    fn cleared_formation_advances_the_level() {
        let mut state = playing_state();
        state.enemies.clear();

        tick(&mut state, &TickInput::default());
        assert_eq!(state.level, 2);
        assert_eq!(state.enemies.len(), 50);
        assert!((state.game_speed - 1.1).abs() < 1e-6);
        assert!(state.events.contains(&GameEvent::LevelUp { level: 2 }));
    }

    #[test]
    fn same_seed_and_inputs_reproduce_the_same_state() {
        let cfg = GameConfig::default();
        let mut a = GameState::new(cfg.clone(), 99999);
        let mut b = GameState::new(cfg, 99999);
        a.finish_loading(200, 1.2);
        b.finish_loading(200, 1.2);

        let inputs = [
            TickInput { start: true, ..Default::default() },
            TickInput { move_right: true, ..Default::default() },
            TickInput { fire: true, move_right: true, ..Default::default() },
            TickInput::default(),
            TickInput { move_left: true, ..Default::default() },
        ];
        for input in &inputs {
            tick(&mut a, input);
            tick(&mut b, input);
        }
        for _ in 0..500 {
            tick(&mut a, &TickInput::default());
            tick(&mut b, &TickInput::default());
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.score, b.score);
        assert_eq!(a.player, b.player);
        assert_eq!(a.enemies, b.enemies);
        assert_eq!(a.enemy_shots, b.enemy_shots);
    }
}
