//! Frame composition
//!
//! Reads the game state once per frame and issues draw calls in a fixed
//! order: background, player, formation, shots, HUD, then the overlay for
//! the current phase. Never mutates game data.

use glam::Vec2;

use super::surface::{Color, Surface, TextAlign};
use crate::consts::*;
use crate::sim::{GamePhase, GameState, Rect, Tint};

/// Map a display token to its on-screen color
pub fn tint_color(tint: Tint) -> Color {
    match tint {
        Tint::Player | Tint::PlayerShot => Color::opaque(0x00, 0xff, 0x00),
        Tint::FrontRow | Tint::EnemyShot => Color::opaque(0xff, 0x00, 0x00),
        Tint::MidRow => Color::opaque(0xff, 0x88, 0x00),
        Tint::BackRow => Color::opaque(0xff, 0xff, 0x00),
    }
}

/// Draw one complete frame of the current state.
pub fn draw_frame<S: Surface>(surface: &mut S, state: &GameState) {
    surface.fill_rect(
        Rect::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT),
        Color::BLACK,
    );

    if state.phase == GamePhase::Loading {
        surface.fill_text(
            "LOADING...",
            Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0),
            24.0,
            TextAlign::Center,
            Color::WHITE,
        );
        return;
    }

    surface.fill_rect(state.player.rect, tint_color(state.player.tint));
    for enemy in &state.enemies {
        surface.fill_rect(enemy.rect, tint_color(enemy.tint));
    }
    for shot in state.shots.iter().chain(&state.enemy_shots) {
        surface.fill_rect(shot.rect, tint_color(shot.tint));
    }

    draw_hud(surface, state);

    match state.phase {
        GamePhase::Menu => draw_menu(surface, state),
        GamePhase::Paused => draw_paused(surface),
        GamePhase::GameOver => draw_game_over(surface, state),
        GamePhase::Playing | GamePhase::Loading => {}
    }
}

fn draw_hud<S: Surface>(surface: &mut S, state: &GameState) {
    let lines = [
        (format!("Score: {}", state.score), 25.0),
        (format!("Ammo: {}", state.ammunition), 50.0),
        (format!("Lives: {}", state.lives), 75.0),
        (format!("Level: {}", state.level), 100.0),
        (format!("Multiplier: {:.1}x", state.multiplier), 125.0),
    ];
    for (text, y) in lines {
        surface.fill_text(&text, Vec2::new(10.0, y), 16.0, TextAlign::Left, Color::WHITE);
    }
    surface.fill_text(
        "Controls: Arrow keys to move, Space to shoot, P to pause",
        Vec2::new(10.0, CANVAS_HEIGHT - 10.0),
        12.0,
        TextAlign::Left,
        Color::WHITE,
    );
}

fn overlay<S: Surface>(surface: &mut S, alpha: f32) {
    surface.fill_rect(
        Rect::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT),
        Color::with_alpha(0x00, 0x00, 0x00, alpha),
    );
}

fn draw_menu<S: Surface>(surface: &mut S, state: &GameState) {
    overlay(surface, 0.7);
    let center = CANVAS_WIDTH / 2.0;
    surface.fill_text(
        "SKY INVADERS",
        Vec2::new(center, 200.0),
        32.0,
        TextAlign::Center,
        Color::WHITE,
    );
    surface.fill_text(
        &format!("Ammunition: {}", state.ammunition),
        Vec2::new(center, 250.0),
        18.0,
        TextAlign::Center,
        Color::WHITE,
    );
    surface.fill_text(
        &format!("Multiplier: {:.1}x", state.multiplier),
        Vec2::new(center, 280.0),
        18.0,
        TextAlign::Center,
        Color::WHITE,
    );
    surface.fill_text(
        "Press ENTER to start",
        Vec2::new(center, 350.0),
        18.0,
        TextAlign::Center,
        Color::WHITE,
    );
}

fn draw_paused<S: Surface>(surface: &mut S) {
    overlay(surface, 0.7);
    let center = CANVAS_WIDTH / 2.0;
    surface.fill_text(
        "PAUSED",
        Vec2::new(center, 250.0),
        36.0,
        TextAlign::Center,
        Color::YELLOW,
    );
    surface.fill_text(
        "Press P to resume",
        Vec2::new(center, 300.0),
        16.0,
        TextAlign::Center,
        Color::WHITE,
    );
}

fn draw_game_over<S: Surface>(surface: &mut S, state: &GameState) {
    overlay(surface, 0.8);
    let center = CANVAS_WIDTH / 2.0;
    surface.fill_text(
        "GAME OVER",
        Vec2::new(center, 250.0),
        36.0,
        TextAlign::Center,
        Color::RED,
    );
    surface.fill_text(
        &format!("Final Score: {}", state.score),
        Vec2::new(center, 300.0),
        20.0,
        TextAlign::Center,
        Color::WHITE,
    );
    surface.fill_text(
        "Press ESC to exit",
        Vec2::new(center, 350.0),
        16.0,
        TextAlign::Center,
        Color::WHITE,
    );
}
