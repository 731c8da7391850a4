//! Wire traffic produced by key presses through a client session.

use glam::DVec2;
use rstest::{fixture, rstest};
use test_utils::{assert_all_present, player_at, world_with, WOLF};
use wayside::grid::{GridCell, ObjectId};
use wayside::host::{HostPorts, PlayerState};
use wayside::protocol::ActionMessage;
use wayside::session::{ClientSession, FrameContext, KeyContext};
use wayside::settings::ClientSettings;
use wayside::world_handle::{FixedPitchText, OutboundAction, Outbox, WireOffset, WorldHandle};

struct Host {
    world: WorldHandle,
    offset: WireOffset,
    outbox: Outbox,
    text: FixedPitchText,
    session: ClientSession,
}

impl Host {
    fn key(&mut self, key: char, player: &PlayerState) -> bool {
        let ctx = KeyContext {
            say_field_focused: false,
            player,
        };
        let mut ports = HostPorts {
            world: &self.world,
            coords: &self.offset,
            sink: &mut self.outbox,
            text: &self.text,
        };
        self.session.key_down(key, &ctx, &mut ports)
    }

    fn frame(&mut self, player: &PlayerState, now: i64) -> Vec<wayside::DrawCommand> {
        let ctx = FrameContext {
            player,
            center: DVec2::ZERO,
            now,
        };
        let mut ports = HostPorts {
            world: &self.world,
            coords: &self.offset,
            sink: &mut self.outbox,
            text: &self.text,
        };
        self.session.frame(&ctx, &mut ports)
    }

    fn lines(&self) -> Vec<String> {
        self.outbox.wire_lines().collect()
    }
}

#[fixture]
fn host() -> Host {
    Host {
        world: world_with(&[(11, 20, WOLF)]),
        offset: WireOffset {
            origin: GridCell::new(10, 20),
        },
        outbox: Outbox::default(),
        text: FixedPitchText::default(),
        session: ClientSession::new(ClientSettings {
            emotion_words: ["HAPPY", "MAD", "SAD", "LOVE", "OOPS", "SICK", "HMPH", "-", "-", "YES"]
                .map(str::to_owned)
                .to_vec(),
            ..ClientSettings::default()
        }),
    }
}

#[rstest]
fn use_and_remove_target_the_cell_to_the_right(mut host: Host) {
    let player = player_at(12, 25);
    assert!(host.key('u', &player));
    assert!(host.key('r', &player));
    assert_eq!(host.lines(), vec!["USE 3 5", "REMV 3 5 -1#"]);
}

#[rstest]
#[case::store('q', "SELF 2 5 5#")]
#[case::swap('Q', "DROP 2 5 5#")]
fn backpack_keys_with_full_hands(mut host: Host, #[case] key: char, #[case] expected: &str) {
    let mut player = player_at(12, 25);
    player.holding = Some(ObjectId(71));
    assert!(host.key(key, &player));
    assert_eq!(host.lines(), vec![expected]);
    assert!(matches!(
        host.outbox.sent.first(),
        Some(OutboundAction::NextAction { dropping: true, .. })
    ));
}

#[rstest]
fn backpack_key_empty_handed_takes_item_out(mut host: Host) {
    assert!(host.key('q', &player_at(12, 25)));
    assert_eq!(host.lines(), vec!["SREMV 2 5 5 -1#"]);
}

#[rstest]
fn recorded_lines_parse_back(mut host: Host) {
    let player = player_at(12, 25);
    for key in ['u', 'r', 'q', '3', '9'] {
        host.key(key, &player);
    }
    let parsed: Vec<ActionMessage> = host
        .lines()
        .iter()
        .map(|line| line.parse().unwrap_or_else(|e| panic!("{line}: {e}")))
        .collect();
    assert_eq!(parsed.last(), Some(&ActionMessage::Emote { id: 11 }));
    assert_eq!(parsed.len(), 5);
}

#[rstest]
fn permanent_emote_repeats_every_interval(mut host: Host) {
    let player = player_at(12, 25);
    host.session.set_emote(6, 1_000);
    for now in 1_000..=1_020 {
        host.frame(&player, now);
    }
    assert_eq!(host.lines(), vec!["EMOT 0 0 6#", "EMOT 0 0 6#"]);
}

#[rstest]
fn help_overlay_lists_emotions_and_commands(mut host: Host) {
    let player = player_at(12, 25);
    host.key('h', &player);
    let commands = host.frame(&player, 0);
    assert_all_present(
        &commands,
        &["12", "25", " 0: HAPPY", " 7: YES", "WASD MOVE", "/DIE - BABY SUICIDE"],
    );
}

#[rstest]
fn walking_into_wolf_corner_sends_nothing(mut host: Host) {
    let player = player_at(10, 20);
    host.key('w', &player);
    host.key('d', &player);
    host.frame(&player, 0);
    assert!(host.outbox.click_moves().next().is_none());
}
