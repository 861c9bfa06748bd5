//! End-to-end board scenarios driven through the public engine API.

#![allow(clippy::float_cmp)]

use stickerboard::camera::Point;
use stickerboard::config::BoardConfig;
use stickerboard::doc::{ObjectBody, ObjectId};
use stickerboard::engine::{Action, EngineCore};
use stickerboard::input::{Button, Key, Modifiers};
use stickerboard::stroke::StrokeMode;
use stickerboard::textfit::FixedAdvance;
use stickerboard::tool::ToolMode;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn click(core: &mut EngineCore, at: Point, modifiers: Modifiers) -> Vec<Action> {
    let mut actions = core.on_pointer_down(at, Button::Primary, modifiers);
    actions.extend(core.on_pointer_up(at, Button::Primary, modifiers));
    actions
}

fn created_id(actions: &[Action]) -> ObjectId {
    actions
        .iter()
        .find_map(|a| match a {
            Action::ObjectCreated(obj) => Some(obj.id),
            _ => None,
        })
        .expect("an object should have been created")
}

#[test]
fn long_word_sticker_shrinks_to_fit() {
    let mut core = EngineCore::with_config(BoardConfig::default(), Box::new(FixedAdvance(0.5)));
    core.set_tool(ToolMode::Placement);
    let id = created_id(&click(&mut core, pt(300.0, 300.0), Modifiers::default()));

    let actions = core.on_edit_input("supercalifragilisticexpialidocious");
    assert!(matches!(actions.as_slice(), [Action::RestyleTextEditor { font_px, .. }] if *font_px == 10.0));
    core.on_edit_blur();

    let label = core.object(&id).and_then(|o| o.label()).expect("sticker label");
    assert_eq!(label.text, "supercalifragilisticexpialidocious");
    assert_eq!(label.font_size, 10);
}

#[test]
fn pen_and_eraser_strokes() {
    let mut core = EngineCore::new();
    core.set_tool(ToolMode::Drawing);
    core.on_pointer_down(pt(10.0, 10.0), Button::Primary, Modifiers::default());
    for (x, y) in [(20.0, 15.0), (30.0, 20.0), (40.0, 25.0)] {
        core.on_pointer_move(pt(x, y), Modifiers::default());
    }
    let pen = created_id(&core.on_pointer_up(pt(40.0, 25.0), Button::Primary, Modifiers::default()));

    let obj = core.object(&pen).expect("pen stroke");
    let ObjectBody::Stroke(stroke) = &obj.body else {
        panic!("expected a stroke body");
    };
    assert_eq!(stroke.points.len(), 4);
    assert_eq!(stroke.mode, StrokeMode::Pen);
    assert!(obj.is_hit_testable());

    core.set_tool(ToolMode::Eraser);
    core.on_pointer_down(pt(20.0, 15.0), Button::Primary, Modifiers::default());
    core.on_pointer_move(pt(30.0, 20.0), Modifiers::default());
    let eraser = created_id(&core.on_pointer_up(pt(30.0, 20.0), Button::Primary, Modifiers::default()));

    let obj = core.object(&eraser).expect("eraser stroke");
    assert!(matches!(&obj.body, ObjectBody::Stroke(s) if s.mode == StrokeMode::Eraser));
    assert!(!obj.is_hit_testable());
}

#[test]
fn shift_select_two_stickers_and_delete() {
    let mut core = EngineCore::new();
    core.set_tool(ToolMode::Placement);
    let a = created_id(&click(&mut core, pt(200.0, 200.0), Modifiers::default()));
    core.set_tool(ToolMode::Placement);
    let b = created_id(&click(&mut core, pt(600.0, 200.0), Modifiers::default()));
    core.set_tool(ToolMode::Selection);

    click(&mut core, pt(200.0, 200.0), Modifiers::default());
    click(&mut core, pt(600.0, 200.0), Modifiers { shift: true, ..Default::default() });
    assert_eq!(core.selection(), &[a, b]);

    let actions = core.on_key_down(&Key("Delete".to_owned()), Modifiers::default());
    assert!(actions.contains(&Action::ObjectDeleted { id: a }));
    assert!(actions.contains(&Action::ObjectDeleted { id: b }));
    assert!(core.object(&a).is_none());
    assert!(core.object(&b).is_none());
    assert!(core.selection().is_empty());
}

#[test]
fn tool_shortcut_mid_resize_settles_sticker() {
    let mut core = EngineCore::new();
    core.set_tool(ToolMode::Placement);
    let id = created_id(&click(&mut core, pt(200.0, 200.0), Modifiers::default()));
    core.set_tool(ToolMode::Selection);
    core.request_save().expect("save request");
    assert!(!core.is_dirty());

    click(&mut core, pt(200.0, 200.0), Modifiers::default());
    core.on_pointer_down(pt(300.0, 300.0), Button::Primary, Modifiers::default());
    core.on_pointer_move(pt(110.0, 110.0), Modifiers::default());
    let actions = core.on_key_down(&Key("d".to_owned()), Modifiers::default());

    let obj = core.object(&id).expect("sticker");
    assert_eq!((obj.width, obj.height), (50.0, 50.0));
    assert!(actions.iter().any(|a| matches!(a, Action::ObjectUpdated(o) if o.id == id && o.width == 50.0)));
    assert!(core.is_dirty());
    assert_eq!(core.tool(), ToolMode::Drawing);
}
