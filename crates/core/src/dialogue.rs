//! Companion dialogue collaborator, injected into `Game` at construction.

use crate::random::{RandomSource, SeededRandom};
use crate::types::{HazardKind, Level, RoomCategory};

/// What the companion can see when asked for a line.
#[derive(Clone, Debug, PartialEq)]
pub struct DialogueContext {
    pub level: Level,
    pub category: RoomCategory,
    pub hazard: Option<HazardKind>,
    pub is_loop: bool,
    pub items_present: usize,
    pub rooms_explored: u32,
    pub sanity: f32,
}

pub trait DialogueService {
    /// `None` means the companion stays quiet this time.
    fn line(&mut self, context: &DialogueContext) -> Option<String>;
}

pub struct SilentDialogue;

impl DialogueService for SilentDialogue {
    fn line(&mut self, _context: &DialogueContext) -> Option<String> {
        None
    }
}

const LOW_SANITY_SANITY: f32 = 30.0;
const ITEM_HINT_CHANCE: f64 = 0.3;
const EXIT_HINT_CHANCE: f64 = 0.2;
const EXIT_HINT_AFTER_ROOMS: u32 = 10;

/// Canned lines picked by a fixed priority: hazard, low sanity, loop room,
/// first room, item hint, exit hint, then a line for the room category.
pub struct FixedDialogue {
    random: Box<dyn RandomSource>,
}

impl FixedDialogue {
    pub fn new(random: Box<dyn RandomSource>) -> Self {
        Self { random }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(Box::new(SeededRandom::new(seed)))
    }

    fn pick(&mut self, lines: &[&str]) -> String {
        lines[self.random.index(lines.len())].to_string()
    }
}

impl DialogueService for FixedDialogue {
    fn line(&mut self, context: &DialogueContext) -> Option<String> {
        let lines = if let Some(hazard) = context.hazard {
            hazard_lines(hazard)
        } else if context.sanity < LOW_SANITY_SANITY {
            LOW_SANITY
        } else if context.is_loop {
            LOOP
        } else if context.rooms_explored == 0 {
            INTRO
        } else if context.items_present > 0 && self.random.chance(ITEM_HINT_CHANCE) {
            ITEM_HINT
        } else if context.rooms_explored > EXIT_HINT_AFTER_ROOMS
            && self.random.chance(EXIT_HINT_CHANCE)
        {
            EXIT_HINT
        } else {
            explore_lines(context.level, context.category)
        };
        Some(self.pick(lines))
    }
}

const LOW_SANITY: &[&str] = &[
    "The walls are breathing. Tell me you see it too.",
    "I can't remember which way we came in.",
    "Is that humming getting louder, or is it me?",
];

const LOOP: &[&str] = &[
    "Wait. We've been here. That stain on the carpet is the same.",
    "This room is repeating. Look for whatever doesn't fit.",
];

const INTRO: &[&str] = &[
    "Where are we? Everything is yellow and it smells like wet carpet.",
    "Stay close. We need to find a way out of here.",
];

const ITEM_HINT: &[&str] = &[
    "There's something on the floor over there. Might be useful.",
    "Grab what you can. We don't know when we'll find more.",
];

const EXIT_HINT: &[&str] = &[
    "The air feels different this way. Maybe an exit is close.",
    "I swear I saw a door that didn't match the others.",
];

fn hazard_lines(hazard: HazardKind) -> &'static [&'static str] {
    match hazard {
        HazardKind::Smiler => &[
            "Don't make a sound. Something is grinning in the dark.",
            "Those teeth... keep quiet and back away slowly.",
        ],
        HazardKind::SkinStealer => &[
            "That thing is wearing a face. Run!",
            "It moves like a person but it isn't one.",
        ],
        HazardKind::Shadow => &[
            "Keep the light up. The shadows are moving.",
            "It hates the light. Don't let the lamp go out.",
        ],
        HazardKind::Partygoer => &[
            "Balloons? Who throws a party down here?",
            "Don't accept anything they offer you.",
        ],
    }
}

fn explore_lines(level: Level, category: RoomCategory) -> &'static [&'static str] {
    match (level, category) {
        (Level::GridRooms, _) | (_, RoomCategory::Grid) => &[
            "Every room is the same grid. How do we tell them apart?",
            "At least nothing hunts us here. I think.",
        ],
        (_, RoomCategory::Hazardous) => &[
            "The lights are flickering. Something was here.",
            "Careful. This room feels wrong.",
        ],
        (_, RoomCategory::Hub) => &[
            "A bigger room. Lots of ways to go from here.",
            "Let's catch our breath before picking a door.",
        ],
        (_, RoomCategory::Secret) => &[
            "I don't think we were supposed to find this place.",
            "Someone lived here once. Look at all this stuff.",
        ],
        (_, RoomCategory::Exit) => &["That door... it's different. This could be the way out!"],
        (_, RoomCategory::Portal) => &["The air is shimmering. This leads somewhere else."],
        (_, RoomCategory::Ordinary) => &[
            "More yellow wallpaper. It never ends.",
            "The buzzing lights are giving me a headache.",
            "Which way now?",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandom;

    fn context() -> DialogueContext {
        DialogueContext {
            level: Level::Lobby,
            category: RoomCategory::Ordinary,
            hazard: None,
            is_loop: false,
            items_present: 0,
            rooms_explored: 3,
            sanity: 100.0,
        }
    }

    #[test]
    fn hazard_lines_outrank_everything_else() {
        let mut dialogue = FixedDialogue::new(Box::new(ScriptedRandom::constant(0.0)));
        let line = dialogue
            .line(&DialogueContext {
                hazard: Some(HazardKind::Shadow),
                is_loop: true,
                sanity: 5.0,
                ..context()
            })
            .expect("fixed dialogue always speaks");
        assert!(hazard_lines(HazardKind::Shadow).contains(&line.as_str()));
    }

    #[test]
    fn first_room_uses_intro_lines() {
        let mut dialogue = FixedDialogue::seeded(9);
        let line = dialogue.line(&DialogueContext { rooms_explored: 0, ..context() });
        assert!(line.is_some_and(|line| INTRO.contains(&line.as_str())));
    }

    #[test]
    fn loop_rooms_take_priority_over_category_lines() {
        let mut dialogue = FixedDialogue::seeded(9);
        let line = dialogue.line(&DialogueContext { is_loop: true, ..context() });
        assert!(line.is_some_and(|line| LOOP.contains(&line.as_str())));
    }

    #[test]
    fn silent_dialogue_never_speaks() {
        assert_eq!(SilentDialogue.line(&context()), None);
    }
}
