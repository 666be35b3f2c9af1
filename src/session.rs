use crate::audio::{AudioSink, Cue};
use crate::game::{Round, StepOutcome};
use crate::grid::{Direction, Grid};
use crate::input::InputFrame;
use crate::ui::{GAME_OVER_ITEMS, TITLE_ITEMS, menu_item_at};
use log::info;
use rand::rngs::StdRng;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Screen {
    Title { selected: usize },
    /// Includes the paused sub-state, which lives in the round's phase.
    Playing,
    GameOver { selected: usize },
    Settings,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Flow {
    Continue,
    Exit,
}

/// Screen state machine driving the round, one frame per `update`.
pub struct Session {
    screen: Screen,
    round: Round,
    rng: StdRng,
}

impl Session {
    pub fn new(grid: Grid, mut rng: StdRng) -> Self {
        let round = Round::new(grid, &mut rng);
        Self { screen: Screen::Title { selected: 0 }, round, rng }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    /// Music is stopped before `Flow::Exit` is returned.
    pub fn update(&mut self, input: &InputFrame, audio: &mut dyn AudioSink) -> Flow {
        let flow = if input.quit {
            info!("quit requested");
            Flow::Exit
        } else {
            self.update_screen(input, audio)
        };
        if flow == Flow::Exit {
            audio.stop(Cue::Bgm);
        }
        flow
    }

    fn update_screen(&mut self, input: &InputFrame, audio: &mut dyn AudioSink) -> Flow {
        match self.screen {
            Screen::Title { selected } => self.update_title(selected, input, audio),
            Screen::Settings => {
                if input.confirm || input.back || input.click.is_some() {
                    self.go_to(Screen::Title { selected: 0 });
                }
            }
            Screen::Playing => self.update_playing(input, audio),
            Screen::GameOver { selected } => return self.update_game_over(selected, input, audio),
        }
        Flow::Continue
    }

    fn update_title(&mut self, selected: usize, input: &InputFrame, audio: &mut dyn AudioSink) {
        match navigate(selected, TITLE_ITEMS.len(), input) {
            Choice::Moved(selected) => self.screen = Screen::Title { selected },
            Choice::Confirmed(0) => {
                self.round.restart(&mut self.rng);
                audio.rewind(Cue::Bgm);
                audio.play(Cue::Bgm);
                self.go_to(Screen::Playing);
            }
            Choice::Confirmed(_) => self.go_to(Screen::Settings),
            Choice::Stay => {}
        }
    }

    fn update_playing(&mut self, input: &InputFrame, audio: &mut dyn AudioSink) {
        if input.confirm {
            self.round.toggle_pause();
            if self.round.state().is_paused() {
                audio.pause(Cue::Bgm);
            } else {
                audio.play(Cue::Bgm);
            }
        }

        if let Some(dir) = input.direction {
            if self.round.state().is_running() {
                self.round.steer(dir);
            }
        }

        if let StepOutcome::Ended(_) = self.round.step(&mut self.rng, audio) {
            audio.pause(Cue::Bgm);
            self.go_to(Screen::GameOver { selected: 0 });
        }
    }

    fn update_game_over(&mut self, selected: usize, input: &InputFrame, audio: &mut dyn AudioSink) -> Flow {
        match navigate(selected, GAME_OVER_ITEMS.len(), input) {
            Choice::Moved(selected) => self.screen = Screen::GameOver { selected },
            Choice::Confirmed(0) => {
                self.round.restart(&mut self.rng);
                audio.rewind(Cue::Bgm);
                audio.play(Cue::Bgm);
                self.go_to(Screen::Playing);
            }
            Choice::Confirmed(1) => {
                self.round.restart(&mut self.rng);
                audio.rewind(Cue::Bgm);
                self.go_to(Screen::Title { selected: 0 });
            }
            Choice::Confirmed(_) => {
                info!("exit chosen from the game over menu");
                return Flow::Exit;
            }
            Choice::Stay => {}
        }
        Flow::Continue
    }

    fn go_to(&mut self, screen: Screen) {
        info!("{:?} -> {:?}", self.screen, screen);
        self.screen = screen;
    }
}

enum Choice {
    Stay,
    Moved(usize),
    Confirmed(usize),
}

/// Up/down with wraparound; a click on an item selects and confirms it.
fn navigate(selected: usize, count: usize, input: &InputFrame) -> Choice {
    if let Some(item) = input.click.and_then(|at| menu_item_at(at, input.screen, count)) {
        return Choice::Confirmed(item);
    }
    if input.confirm {
        return Choice::Confirmed(selected);
    }
    match input.direction {
        Some(Direction::Up) => Choice::Moved((selected + count - 1) % count),
        Some(Direction::Down) => Choice::Moved((selected + 1) % count),
        _ => Choice::Stay,
    }
}
