//! Game module - the falling-block engine state machine.
//!
//! Owns the board, the active piece, the bag and the score/level counters,
//! and drives them through the Idle -> Running (-> Paused) -> GameOver
//! lifecycle. Every observable change rebuilds an immutable snapshot and
//! pushes it to all subscribed observers before the mutating call returns.
//!
//! Gravity timing lives outside this type (see `engine::Session`); the timer
//! calls [`Game::gravity_tick`], which funnels into the same single step
//! routine as manual drops.

use crate::core::{
    scoring::{drop_interval_ms, drop_score, level_for_lines, line_clear_score},
    Board, GameObserver, GameSnapshot, Piece, PieceBag,
};
use crate::types::{GameAction, BOARD_HEIGHT, BOARD_WIDTH, ROTATION_KICKS};

/// Complete engine state for one play session
pub struct Game {
    board: Board,
    active: Option<Piece>,
    bag: PieceBag,
    score: u32,
    level: u32,
    lines: u32,
    running: bool,
    paused: bool,
    game_over: bool,
    player_name: String,
    observers: Vec<Box<dyn GameObserver>>,
}

impl Game {
    /// Create an idle engine with the given bag seed
    pub fn new(seed: u32) -> Self {
        Self {
            board: Board::new(),
            active: None,
            bag: PieceBag::new(seed),
            score: 0,
            level: 0,
            lines: 0,
            running: false,
            paused: false,
            game_over: false,
            player_name: String::new(),
            observers: Vec::new(),
        }
    }

    /// Register an observer; it receives every snapshot from now on,
    /// synchronously and in subscription order.
    pub fn subscribe(&mut self, observer: Box<dyn GameObserver>) {
        self.observers.push(observer);
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    /// Gravity interval for the current level
    pub fn drop_interval_ms(&self) -> u64 {
        drop_interval_ms(self.level)
    }

    /// Begin a session: reset board and counters, spawn the first piece.
    /// Valid from Idle or GameOver.
    pub fn start(&mut self, name: &str) {
        self.board.clear();
        self.score = 0;
        self.level = 0;
        self.lines = 0;
        self.running = true;
        self.paused = false;
        self.game_over = false;
        self.player_name = name.to_string();
        self.spawn_next();
    }

    /// Explicit transition to GameOver from any running state
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.paused = false;
        self.game_over = true;
        self.emit();
    }

    /// Toggle the paused sub-state; only meaningful while running
    pub fn toggle_pause(&mut self) {
        if !self.running {
            return;
        }
        self.paused = !self.paused;
        self.emit();
    }

    fn accepts_input(&self) -> bool {
        self.running && !self.paused
    }

    /// Horizontal move; invalid targets are silently rejected
    pub fn move_piece(&mut self, dx: i8) {
        if !self.accepts_input() {
            return;
        }
        let Some(piece) = self.active else {
            return;
        };
        let candidate = Piece {
            x: piece.x + dx,
            ..piece
        };
        if candidate.is_valid(&self.board) {
            self.active = Some(candidate);
        }
        self.emit();
    }

    /// Rotate to the next state, trying each kick offset in order and taking
    /// the first valid placement. If none validates the rotation is rejected
    /// whole: prior rotation and position are kept.
    pub fn rotate(&mut self) {
        if !self.accepts_input() {
            return;
        }
        let Some(piece) = self.active else {
            return;
        };
        let rotated = Piece {
            rotation: piece.next_rotation(),
            ..piece
        };
        for k in ROTATION_KICKS {
            let candidate = Piece {
                x: rotated.x + k,
                ..rotated
            };
            if candidate.is_valid(&self.board) {
                self.active = Some(candidate);
                self.emit();
                return;
            }
        }
    }

    /// Manual single-row drop; each successful step awards one point
    pub fn soft_drop(&mut self) {
        if !self.accepts_input() {
            return;
        }
        if self.gravity_step() {
            self.score += drop_score(1, false);
            self.emit();
        }
    }

    /// Drop until the piece settles, awarding two points per row fallen.
    ///
    /// Drop points are banked before the piece merges, so the game-over
    /// snapshot (and anything submitted from it) carries the full score
    /// even when this very drop tops out the board.
    pub fn hard_drop(&mut self) {
        if !self.accepts_input() {
            return;
        }
        let Some(piece) = self.active else {
            return;
        };
        let mut target = piece;
        let mut distance = 0u32;
        loop {
            let candidate = Piece {
                y: target.y + 1,
                ..target
            };
            if !candidate.is_valid(&self.board) {
                break;
            }
            target = candidate;
            distance += 1;
        }
        self.active = Some(target);
        self.score += drop_score(distance, true);
        // The piece can no longer move: this settles it in one step.
        self.gravity_step();
    }

    /// Timer-driven gravity; a no-op while paused or outside Running
    pub fn gravity_tick(&mut self) {
        if !self.accepts_input() {
            return;
        }
        self.gravity_step();
    }

    /// Dispatch a player input
    pub fn apply_action(&mut self, action: GameAction) {
        match action {
            GameAction::MoveLeft => self.move_piece(-1),
            GameAction::MoveRight => self.move_piece(1),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Rotate => self.rotate(),
            GameAction::TogglePause => self.toggle_pause(),
        }
    }

    /// Attempt to move the active piece one row down.
    ///
    /// This is the single settle choke point - timer tick, soft drop and the
    /// end of a hard drop all land here. A step that cannot move merges the piece,
    /// clears lines, applies scoring (even for zero clears) and spawns the
    /// next piece, exactly once per failed step.
    fn gravity_step(&mut self) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        let candidate = Piece {
            y: piece.y + 1,
            ..piece
        };
        if candidate.is_valid(&self.board) {
            self.active = Some(candidate);
            self.emit();
            return true;
        }

        self.board.merge(&piece.cells(), piece.kind);
        let cleared = self.board.clear_full_rows();
        self.apply_clear(cleared);
        self.spawn_next();
        false
    }

    fn apply_clear(&mut self, cleared: u32) {
        self.score += line_clear_score(cleared);
        self.lines += cleared;
        let new_level = level_for_lines(self.lines);
        if new_level > self.level {
            self.level = new_level;
        }
    }

    /// Draw the next piece and place it at spawn. A spawn that does not fit
    /// is the sole game-over trigger.
    fn spawn_next(&mut self) {
        let piece = Piece::spawn(self.bag.draw());
        self.active = Some(piece);
        if piece.is_valid(&self.board) {
            self.emit();
        } else {
            self.stop();
        }
    }

    /// Build a fresh snapshot: settled cells with the active piece composited
    /// in (in-bounds cells only), plus the session counters and flags.
    pub fn snapshot(&self) -> GameSnapshot {
        let mut board = [[0u8; BOARD_WIDTH]; BOARD_HEIGHT];
        self.board.write_u8_grid(&mut board);
        if let Some(piece) = self.active {
            for (x, y) in piece.cells() {
                if (0..BOARD_WIDTH as i8).contains(&x) && (0..BOARD_HEIGHT as i8).contains(&y) {
                    board[y as usize][x as usize] = piece.kind.cell_value();
                }
            }
        }
        GameSnapshot {
            board,
            score: self.score,
            level: self.level,
            lines: self.lines,
            running: self.running,
            paused: self.paused,
            game_over: self.game_over,
            player_name: self.player_name.clone(),
        }
    }

    fn emit(&mut self) {
        let snapshot = self.snapshot();
        for observer in &mut self.observers {
            observer.on_snapshot(&snapshot);
        }
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub fn set_active_for_test(&mut self, piece: Piece) {
        self.active = Some(piece);
    }

    #[cfg(test)]
    pub fn set_lines_for_test(&mut self, lines: u32) {
        self.lines = lines;
        self.level = level_for_lines(lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;
    use std::sync::{Arc, Mutex};

    struct CountingObserver {
        count: Arc<Mutex<u32>>,
        last: Arc<Mutex<Option<GameSnapshot>>>,
    }

    impl GameObserver for CountingObserver {
        fn on_snapshot(&mut self, snapshot: &GameSnapshot) {
            *self.count.lock().unwrap() += 1;
            *self.last.lock().unwrap() = Some(snapshot.clone());
        }
    }

    fn started_game(seed: u32) -> Game {
        let mut game = Game::new(seed);
        game.start("tester");
        game
    }

    /// Force a known active piece for board-setup-heavy tests.
    fn set_active(game: &mut Game, piece: Piece) {
        game.active = Some(piece);
    }

    #[test]
    fn test_new_game_is_idle() {
        let game = Game::new(1);
        assert!(!game.running());
        assert!(!game.game_over());
        assert!(!game.paused());
        assert!(game.active().is_none());
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_start_spawns_and_resets() {
        let mut game = started_game(12345);
        assert!(game.running());
        assert!(game.active().is_some());
        assert_eq!(game.player_name(), "tester");

        // Dirty the counters, then restart.
        game.score = 900;
        game.lines = 30;
        game.level = 3;
        game.board.set(0, 19, Some(PieceKind::I));

        game.start("second");
        assert_eq!(game.score(), 0);
        assert_eq!(game.level(), 0);
        assert_eq!(game.lines(), 0);
        assert_eq!(game.board.get(0, 19), Some(None));
        assert_eq!(game.player_name(), "second");
        assert!(game.running());
        assert!(!game.game_over());
    }

    #[test]
    fn test_move_commits_valid_and_rejects_at_wall() {
        let mut game = started_game(12345);
        let x0 = game.active().unwrap().x;

        game.move_piece(1);
        assert_eq!(game.active().unwrap().x, x0 + 1);
        game.move_piece(-1);
        assert_eq!(game.active().unwrap().x, x0);

        // Push into the left wall; the rejected moves leave the piece put.
        for _ in 0..12 {
            game.move_piece(-1);
        }
        let piece = game.active().unwrap();
        assert!(piece.is_valid(&game.board));
        assert!(piece.cells().iter().all(|&(x, _)| x >= 0));
        let wall_x = piece.x;
        game.move_piece(-1);
        assert_eq!(game.active().unwrap().x, wall_x);
    }

    #[test]
    fn test_rotate_takes_first_valid_kick_offset() {
        let mut game = started_game(1);
        // T at mid-board; block the in-place rotation target below its stem
        // so offset 0 fails while both -1 and +1 would succeed.
        set_active(
            &mut game,
            Piece {
                kind: PieceKind::T,
                rotation: 0,
                x: 4,
                y: 10,
            },
        );
        game.board.set(5, 12, Some(PieceKind::I));

        game.rotate();
        let piece = game.active().unwrap();
        assert_eq!(piece.rotation, 1);
        // First match wins: -1, never +1 or -2.
        assert_eq!(piece.x, 3);
    }

    #[test]
    fn test_rotate_rejected_whole_when_no_kick_fits() {
        let mut game = started_game(1);
        // T resting on the floor: its next state needs row 20, which is out of
        // bounds at every horizontal offset.
        set_active(
            &mut game,
            Piece {
                kind: PieceKind::T,
                rotation: 0,
                x: 4,
                y: 18,
            },
        );
        game.rotate();
        let piece = game.active().unwrap();
        assert_eq!(piece.rotation, 0);
        assert_eq!(piece.x, 4);
        assert_eq!(piece.y, 18);
    }

    #[test]
    fn test_soft_drop_awards_one_point_per_step() {
        let mut game = started_game(12345);
        let score0 = game.score();
        let y0 = game.active().unwrap().y;

        game.soft_drop();
        assert_eq!(game.active().unwrap().y, y0 + 1);
        assert_eq!(game.score(), score0 + 1);
    }

    #[test]
    fn test_hard_drop_awards_two_points_per_cell() {
        let mut game = started_game(1);
        // Vertical I at a known spot: cells in column 2, rows 10..=13.
        set_active(
            &mut game,
            Piece {
                kind: PieceKind::I,
                rotation: 1,
                x: 0,
                y: 10,
            },
        );
        let score0 = game.score();
        game.hard_drop();
        // Falls 6 rows (bottom cell from row 13 to row 19), no lines cleared.
        assert_eq!(game.score(), score0 + 12);
        assert_eq!(game.lines(), 0);
        // The piece settled and a new one spawned.
        assert_eq!(game.board.get(2, 19), Some(Some(PieceKind::I)));
        assert!(game.active().is_some());
    }

    #[test]
    fn test_hard_drop_line_clear_scoring() {
        let mut game = started_game(1);
        // Fill the bottom four rows except column 2, then drop a vertical I
        // into the gap: four simultaneous clears.
        for y in 16..20 {
            for x in 0..BOARD_WIDTH as i8 {
                if x != 2 {
                    game.board.set(x, y, Some(PieceKind::O));
                }
            }
        }
        set_active(
            &mut game,
            Piece {
                kind: PieceKind::I,
                rotation: 1,
                x: 0,
                y: 10,
            },
        );
        let score0 = game.score();
        game.hard_drop();
        // 6 rows fallen (12 points) plus 800 for the quadruple clear.
        assert_eq!(game.score(), score0 + 12 + 800);
        assert_eq!(game.lines(), 4);
        // The board is empty again below the spawn area.
        for y in 16..20 {
            for x in 0..BOARD_WIDTH as i8 {
                assert_eq!(game.board.get(x, y), Some(None), "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_level_up_crossing_ten_lines() {
        let mut game = started_game(1);
        game.lines = 9;
        assert_eq!(game.drop_interval_ms(), 1000);

        // One full row plus a vertical I in the gap clears a single line.
        for x in 0..BOARD_WIDTH as i8 {
            if x != 2 {
                game.board.set(x, 19, Some(PieceKind::O));
            }
        }
        set_active(
            &mut game,
            Piece {
                kind: PieceKind::I,
                rotation: 1,
                x: 0,
                y: 10,
            },
        );
        game.hard_drop();

        assert_eq!(game.lines(), 10);
        assert_eq!(game.level(), 1);
        assert_eq!(game.drop_interval_ms(), 900);
    }

    #[test]
    fn test_gravity_tick_descends_then_settles() {
        let mut game = started_game(12345);
        let piece = game.active().unwrap();
        let bottom = piece.cells().iter().map(|&(_, y)| y).max().unwrap();

        // Enough ticks to reach the floor and settle exactly once.
        let to_floor = (BOARD_HEIGHT as i8 - 1 - bottom) as usize;
        for _ in 0..to_floor {
            game.gravity_tick();
        }
        assert_eq!(game.lines(), 0);
        // Next tick cannot move: merge and spawn.
        game.gravity_tick();
        let respawned = game.active().unwrap();
        assert_eq!(respawned.y, 0);
        assert_ne!(respawned.kind, piece.kind); // same bag, so no repeat yet
    }

    #[test]
    fn test_spawn_collision_is_terminal() {
        let mut game = started_game(12345);
        // Occupy the spawn band so the next spawn cannot fit. Column 0 is
        // left open so none of these rows counts as full and gets cleared.
        for y in 0..3 {
            game.board.fill_row(y, PieceKind::Z);
            game.board.set(0, y as i8, None);
        }
        game.hard_drop();

        assert!(game.game_over());
        assert!(!game.running());

        // Subsequent ticks and inputs mutate nothing.
        let frozen = game.snapshot();
        game.gravity_tick();
        game.move_piece(1);
        game.rotate();
        game.soft_drop();
        game.hard_drop();
        assert_eq!(game.snapshot(), frozen);

        // A fresh start leaves GameOver.
        game.start("again");
        assert!(game.running());
        assert!(!game.game_over());
    }

    #[test]
    fn test_pause_gates_inputs_and_gravity() {
        let mut game = started_game(12345);
        game.toggle_pause();
        assert!(game.paused());

        let before = game.active().unwrap();
        game.move_piece(1);
        game.rotate();
        game.soft_drop();
        game.gravity_tick();
        assert_eq!(game.active().unwrap(), before);

        game.toggle_pause();
        assert!(!game.paused());
        game.gravity_tick();
        assert_eq!(game.active().unwrap().y, before.y + 1);
    }

    #[test]
    fn test_stop_transitions_to_game_over() {
        let mut game = started_game(12345);
        game.stop();
        assert!(!game.running());
        assert!(game.game_over());

        // stop is a no-op outside Running.
        let mut idle = Game::new(1);
        idle.stop();
        assert!(!idle.game_over());
    }

    #[test]
    fn test_observers_receive_snapshots_synchronously() {
        let count = Arc::new(Mutex::new(0u32));
        let last = Arc::new(Mutex::new(None));
        let mut game = Game::new(12345);
        game.subscribe(Box::new(CountingObserver {
            count: Arc::clone(&count),
            last: Arc::clone(&last),
        }));

        game.start("obs");
        let after_start = *count.lock().unwrap();
        assert!(after_start > 0);

        game.move_piece(1);
        assert!(*count.lock().unwrap() > after_start);

        let snap = last.lock().unwrap().clone().unwrap();
        assert!(snap.running);
        assert_eq!(snap.player_name, "obs");
    }

    #[test]
    fn test_snapshot_composites_active_piece() {
        let mut game = started_game(1);
        set_active(
            &mut game,
            Piece {
                kind: PieceKind::O,
                rotation: 0,
                x: 4,
                y: 5,
            },
        );
        let snap = game.snapshot();
        let v = PieceKind::O.cell_value();
        assert_eq!(snap.board[5][4], v);
        assert_eq!(snap.board[5][5], v);
        assert_eq!(snap.board[6][4], v);
        assert_eq!(snap.board[6][5], v);
        // Board itself still has no settled cells there.
        assert_eq!(game.board.get(4, 5), Some(None));
    }

    #[test]
    fn test_no_overlapping_occupied_cells_during_play() {
        // Validity invariant: the active piece never overlaps settled cells.
        let mut game = started_game(42);
        for _ in 0..500 {
            if game.game_over() {
                break;
            }
            game.move_piece(1);
            game.rotate();
            game.gravity_tick();
            if let Some(piece) = game.active() {
                for (x, y) in piece.cells() {
                    if y >= 0 {
                        assert_eq!(game.board.get(x, y), Some(None));
                    }
                }
            }
        }
    }
}
