use std::path::{Path, PathBuf};

use insta::assert_snapshot;
use proptest::prelude::*;
use proptest_derive::Arbitrary;

use super::*;

#[derive(Debug, Default)]
struct TestBuffer {
    text: String,
}

impl DocumentBuffer for TestBuffer {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_owned();
    }

    fn cursor(&self) -> (u32, u32) {
        (1, 1)
    }

    fn max_line_width(&self) -> u32 {
        self.text
            .lines()
            .map(|line| line.chars().count() as u32)
            .max()
            .unwrap_or(0)
            * 9
    }

    fn gutter_width(&self) -> u32 {
        24
    }
}

fn test_path(id: usize) -> PathBuf {
    // Deliberately nonexistent: path identity must work for files that are
    // not on disk.
    PathBuf::from(format!("/steiner-test-does-not-exist/file{id}.stn"))
}

fn arbitrary_panel() -> impl Strategy<Value = PanelId> {
    prop_oneof![
        Just(PanelId::Explorer),
        Just(PanelId::Analysis),
        Just(PanelId::Console),
    ]
}

fn arbitrary_visibility() -> impl Strategy<Value = Visibility> {
    prop_oneof![
        Just(Visibility::Visible),
        Just(Visibility::Hidden),
        Just(Visibility::Minimized),
    ]
}

fn arbitrary_sizes(len: usize) -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(0..2000u32, len)
}

#[derive(Debug, Clone, Arbitrary)]
enum Op {
    ShowPanel(#[proptest(strategy = "arbitrary_panel()")] PanelId),
    HidePanel(#[proptest(strategy = "arbitrary_panel()")] PanelId),
    TogglePanel(#[proptest(strategy = "arbitrary_panel()")] PanelId),
    MinimizePanel(#[proptest(strategy = "arbitrary_panel()")] PanelId),
    ToggleMinimize(#[proptest(strategy = "arbitrary_panel()")] PanelId),
    RestoreVisibility {
        #[proptest(strategy = "arbitrary_panel()")]
        panel: PanelId,
        #[proptest(strategy = "arbitrary_visibility()")]
        visibility: Visibility,
    },
    ResizeTop(#[proptest(strategy = "arbitrary_sizes(3)")] Vec<u32>),
    ResizeMain(#[proptest(strategy = "arbitrary_sizes(2)")] Vec<u32>),
    FitContent {
        #[proptest(strategy = "0..4000u32")]
        content: u32,
        #[proptest(strategy = "0..100u32")]
        gutter: u32,
    },
    OpenDocument(#[proptest(strategy = "1..=5usize")] usize),
    NewUntitled,
    CloseSlot(#[proptest(strategy = "0..6usize")] usize),
    ActivateSlot(#[proptest(strategy = "0..6usize")] usize),
}

impl Op {
    fn apply(self, layout: &mut Layout, docs: &mut DocumentArea<TestBuffer>) {
        match self {
            Op::ShowPanel(panel) => layout.show_panel(panel),
            Op::HidePanel(panel) => layout.hide_panel(panel),
            Op::TogglePanel(panel) => layout.toggle_panel(panel),
            Op::MinimizePanel(panel) => layout.minimize_panel(panel),
            Op::ToggleMinimize(panel) => layout.toggle_minimize(panel),
            Op::RestoreVisibility { panel, visibility } => {
                layout.restore_visibility(panel, visibility)
            }
            Op::ResizeTop(sizes) => layout.set_region_sizes(RegionId::Top, &sizes),
            Op::ResizeMain(sizes) => layout.set_region_sizes(RegionId::Main, &sizes),
            Op::FitContent { content, gutter } => layout.fit_document_area(content, gutter),
            Op::OpenDocument(id) => {
                docs.open(&test_path(id), TestBuffer::default());
            }
            Op::NewUntitled => {
                docs.new_untitled(TestBuffer::default());
            }
            Op::CloseSlot(slot) => docs.close_slot(slot),
            Op::ActivateSlot(slot) => {
                docs.activate(slot);
            }
        }
    }
}

#[track_caller]
fn check_ops_on(
    layout: &mut Layout,
    docs: &mut DocumentArea<TestBuffer>,
    ops: impl IntoIterator<Item = Op>,
) {
    for op in ops {
        op.apply(layout, docs);
        layout.verify_invariants();
        docs.verify_invariants();
    }
}

#[track_caller]
fn check_ops(ops: impl IntoIterator<Item = Op>) -> (Layout, DocumentArea<TestBuffer>) {
    let mut layout = Layout::new(Options::default());
    let mut docs = DocumentArea::new();
    check_ops_on(&mut layout, &mut docs, ops);
    (layout, docs)
}

fn top_sizes(layout: &Layout) -> &[u32] {
    layout.region(RegionId::Top).sizes()
}

fn main_sizes(layout: &Layout) -> &[u32] {
    layout.region(RegionId::Main).sizes()
}

#[test]
fn new_layout_uses_default_sizes() {
    let layout = Layout::new(Options::default());
    layout.verify_invariants();

    assert_snapshot!(format!("{:?}", top_sizes(&layout)), @"[250, 700, 250]");
    assert_snapshot!(format!("{:?}", main_sizes(&layout)), @"[620, 180]");
}

#[test]
fn hide_analysis_absorbs_into_document_area() {
    let (mut layout, mut docs) = check_ops([]);

    check_ops_on(&mut layout, &mut docs, [Op::HidePanel(PanelId::Analysis)]);
    assert_snapshot!(format!("{:?}", top_sizes(&layout)), @"[250, 950, 0]");
    assert_eq!(layout.visibility(PanelId::Analysis), Visibility::Hidden);

    check_ops_on(&mut layout, &mut docs, [Op::ShowPanel(PanelId::Analysis)]);
    assert_snapshot!(format!("{:?}", top_sizes(&layout)), @"[250, 700, 250]");
    assert_eq!(layout.visibility(PanelId::Analysis), Visibility::Visible);
}

#[test]
fn hide_console_absorbs_into_top_region() {
    let (mut layout, mut docs) = check_ops([Op::HidePanel(PanelId::Console)]);
    assert_eq!(main_sizes(&layout), &[800, 0]);

    check_ops_on(&mut layout, &mut docs, [Op::ShowPanel(PanelId::Console)]);
    assert_eq!(main_sizes(&layout), &[620, 180]);
}

#[test]
fn hide_then_show_restores_custom_sizes() {
    let (mut layout, mut docs) = check_ops([Op::ResizeTop(vec![300, 600, 400])]);

    check_ops_on(&mut layout, &mut docs, [Op::HidePanel(PanelId::Analysis)]);
    assert_eq!(top_sizes(&layout), &[300, 1000, 0]);

    check_ops_on(&mut layout, &mut docs, [Op::ShowPanel(PanelId::Analysis)]);
    assert_eq!(top_sizes(&layout), &[300, 600, 400]);
}

#[test]
fn minimize_then_restore_restores_custom_sizes() {
    let (mut layout, mut docs) = check_ops([Op::ResizeMain(vec![500, 300])]);

    check_ops_on(&mut layout, &mut docs, [Op::ToggleMinimize(PanelId::Console)]);
    assert_eq!(main_sizes(&layout), &[800, 0]);
    assert_eq!(layout.visibility(PanelId::Console), Visibility::Minimized);

    check_ops_on(&mut layout, &mut docs, [Op::ToggleMinimize(PanelId::Console)]);
    assert_eq!(main_sizes(&layout), &[500, 300]);
    assert_eq!(layout.visibility(PanelId::Console), Visibility::Visible);
}

#[test]
fn visibility_floor_applies_on_show() {
    // Drag the analysis slot down to the floor before hiding: the remembered
    // vector must not bring the panel back as a sliver.
    let (mut layout, mut docs) = check_ops([
        Op::ResizeTop(vec![250, 930, 20]),
        Op::HidePanel(PanelId::Analysis),
    ]);

    check_ops_on(&mut layout, &mut docs, [Op::ShowPanel(PanelId::Analysis)]);
    assert_eq!(top_sizes(&layout), &[250, 930, 250]);
}

#[test]
fn visibility_floor_applies_on_minimize_restore() {
    let (mut layout, mut docs) = check_ops([
        Op::ResizeTop(vec![250, 930, 18]),
        Op::MinimizePanel(PanelId::Analysis),
    ]);

    check_ops_on(&mut layout, &mut docs, [Op::ToggleMinimize(PanelId::Analysis)]);
    assert_eq!(top_sizes(&layout), &[250, 930, 250]);
}

#[test]
fn visibility_floor_raises_main_content_to_default() {
    let (mut layout, mut docs) = check_ops([
        Op::ResizeMain(vec![100, 20]),
        Op::HidePanel(PanelId::Console),
    ]);

    check_ops_on(&mut layout, &mut docs, [Op::ShowPanel(PanelId::Console)]);
    // Console slot bumped to its default, the top region raised to at least
    // its own default.
    assert_eq!(main_sizes(&layout), &[620, 180]);
}

#[test]
fn show_without_snapshot_uses_defaults() {
    // After a restart the panel is hidden with no remembered sizes.
    let (mut layout, mut docs) = check_ops([Op::RestoreVisibility {
        panel: PanelId::Analysis,
        visibility: Visibility::Hidden,
    }]);
    assert_eq!(top_sizes(&layout), &[250, 950, 0]);

    check_ops_on(&mut layout, &mut docs, [Op::ShowPanel(PanelId::Analysis)]);
    assert_eq!(top_sizes(&layout), &[250, 700, 250]);
}

#[test]
fn toggle_minimize_while_hidden_is_a_noop() {
    let (mut layout, mut docs) = check_ops([Op::HidePanel(PanelId::Explorer)]);
    let before = top_sizes(&layout).to_vec();

    check_ops_on(&mut layout, &mut docs, [Op::ToggleMinimize(PanelId::Explorer)]);
    assert_eq!(layout.visibility(PanelId::Explorer), Visibility::Hidden);
    assert_eq!(top_sizes(&layout), before.as_slice());
}

#[test]
fn hide_while_minimized_keeps_the_preminimize_snapshot() {
    let (mut layout, mut docs) = check_ops([
        Op::ResizeTop(vec![280, 620, 300]),
        Op::MinimizePanel(PanelId::Analysis),
        Op::HidePanel(PanelId::Analysis),
    ]);
    assert_eq!(layout.visibility(PanelId::Analysis), Visibility::Hidden);

    check_ops_on(&mut layout, &mut docs, [Op::ShowPanel(PanelId::Analysis)]);
    assert_eq!(top_sizes(&layout), &[280, 620, 300]);
}

#[test]
fn toggle_panel_restores_a_minimized_panel() {
    let (mut layout, mut docs) = check_ops([
        Op::ResizeMain(vec![700, 100]),
        Op::MinimizePanel(PanelId::Console),
    ]);

    check_ops_on(&mut layout, &mut docs, [Op::TogglePanel(PanelId::Console)]);
    assert_eq!(layout.visibility(PanelId::Console), Visibility::Visible);
    assert_eq!(main_sizes(&layout), &[700, 100]);
}

#[test]
fn resize_applies_verbatim_without_floor() {
    // Explicit user intent wins: no default substitution on live resizes.
    let (layout, _) = check_ops([Op::ResizeTop(vec![10, 1180, 10])]);
    assert_eq!(top_sizes(&layout), &[10, 1180, 10]);
}

#[test]
fn resize_keeps_hidden_slots_collapsed() {
    let (layout, _) = check_ops([
        Op::HidePanel(PanelId::Analysis),
        Op::ResizeTop(vec![200, 700, 300]),
    ]);
    assert_eq!(top_sizes(&layout), &[200, 1000, 0]);
}

#[test]
fn wrong_length_resize_is_ignored() {
    let (layout, _) = check_ops([Op::ResizeTop(vec![100, 100])]);
    assert_eq!(top_sizes(&layout), &[250, 700, 250]);
}

#[test]
fn fit_document_area_clamps_the_desired_width() {
    let (mut layout, mut docs) = check_ops([]);

    check_ops_on(
        &mut layout,
        &mut docs,
        [Op::FitContent {
            content: 10_000,
            gutter: 50,
        }],
    );
    assert_eq!(top_sizes(&layout)[1], 1600);

    check_ops_on(
        &mut layout,
        &mut docs,
        [Op::FitContent {
            content: 0,
            gutter: 0,
        }],
    );
    assert_eq!(top_sizes(&layout)[1], 420);
}

#[test]
fn fit_document_area_keeps_hidden_slots_at_zero() {
    let (mut layout, mut docs) = check_ops([
        Op::HidePanel(PanelId::Explorer),
        Op::HidePanel(PanelId::Analysis),
    ]);

    check_ops_on(
        &mut layout,
        &mut docs,
        [Op::FitContent {
            content: 500,
            gutter: 30,
        }],
    );
    assert_eq!(top_sizes(&layout), &[0, 610, 0]);
}

#[test]
fn fit_document_area_bumps_floor_level_side_slots() {
    let (mut layout, mut docs) = check_ops([Op::ResizeTop(vec![10, 1180, 10])]);

    check_ops_on(
        &mut layout,
        &mut docs,
        [Op::FitContent {
            content: 400,
            gutter: 20,
        }],
    );
    assert_eq!(top_sizes(&layout), &[250, 500, 250]);
}

#[test]
fn minimize_is_independent_per_panel() {
    let (mut layout, mut docs) = check_ops([
        Op::MinimizePanel(PanelId::Analysis),
        Op::MinimizePanel(PanelId::Console),
    ]);

    check_ops_on(&mut layout, &mut docs, [Op::ToggleMinimize(PanelId::Console)]);
    assert_eq!(layout.visibility(PanelId::Console), Visibility::Visible);
    assert_eq!(layout.visibility(PanelId::Analysis), Visibility::Minimized);
}

#[test]
fn open_same_path_reuses_the_slot() {
    let (_, mut docs) = check_ops([Op::OpenDocument(1), Op::OpenDocument(2)]);
    assert_eq!(docs.len(), 2);
    assert_eq!(docs.active_index(), Some(1));

    let slot = docs.open(&test_path(1), TestBuffer::default());
    docs.verify_invariants();

    assert_eq!(slot, 0);
    assert_eq!(docs.len(), 2);
    assert_eq!(docs.active_index(), Some(0));
}

#[test]
fn differently_spelled_paths_are_the_same_document() {
    let (_, mut docs) = check_ops([Op::OpenDocument(1)]);

    let spelled = Path::new("/steiner-test-does-not-exist/sub/../file1.stn");
    let slot = docs.open(spelled, TestBuffer::default());
    docs.verify_invariants();

    assert_eq!(slot, 0);
    assert_eq!(docs.len(), 1);
}

#[test]
fn closing_the_last_slot_synthesizes_an_untitled_document() {
    let (_, docs) = check_ops([Op::OpenDocument(1), Op::CloseSlot(0)]);

    assert_eq!(docs.len(), 1);
    let doc = docs.active().unwrap();
    assert!(doc.path().is_none());
    assert_eq!(doc.title(), "Untitled 1");
}

#[test]
fn untitled_numbers_are_never_reused() {
    let (_, docs) = check_ops([
        Op::NewUntitled,
        Op::NewUntitled,
        Op::CloseSlot(1),
        Op::CloseSlot(0),
        Op::NewUntitled,
    ]);

    // Closing the last slot synthesized "Untitled 3"; the explicit new file
    // took the next number.
    let titles: Vec<&str> = docs.iter().map(|doc| doc.title()).collect();
    assert_eq!(titles, vec!["Untitled 3", "Untitled 4"]);
}

#[test]
fn closing_before_the_active_slot_shifts_it() {
    let (_, docs) = check_ops([
        Op::OpenDocument(1),
        Op::OpenDocument(2),
        Op::OpenDocument(3),
        Op::CloseSlot(0),
    ]);

    assert_eq!(docs.len(), 2);
    assert_eq!(docs.active().unwrap().path(), Some(test_path(3).as_path()));
}

#[test]
fn activate_out_of_bounds_is_a_noop() {
    let (_, docs) = check_ops([Op::OpenDocument(1), Op::ActivateSlot(5)]);
    assert_eq!(docs.active_index(), Some(0));
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    #[test]
    fn random_ops_keep_invariants(
        ops in prop::collection::vec(any::<Op>(), 1..100),
    ) {
        check_ops(ops);
    }

    #[test]
    fn hide_show_roundtrip_preserves_sizes(
        panel in arbitrary_panel(),
        top in prop::collection::vec(21..2000u32, 3),
        main in prop::collection::vec(21..2000u32, 2),
    ) {
        let mut layout = Layout::new(Options::default());
        layout.set_region_sizes(RegionId::Top, &top);
        layout.set_region_sizes(RegionId::Main, &main);

        layout.hide_panel(panel);
        layout.show_panel(panel);

        prop_assert_eq!(top_sizes(&layout), top.as_slice());
        prop_assert_eq!(main_sizes(&layout), main.as_slice());
    }

    #[test]
    fn minimize_restore_roundtrip_preserves_sizes(
        panel in arbitrary_panel(),
        top in prop::collection::vec(21..2000u32, 3),
        main in prop::collection::vec(21..2000u32, 2),
    ) {
        let mut layout = Layout::new(Options::default());
        layout.set_region_sizes(RegionId::Top, &top);
        layout.set_region_sizes(RegionId::Main, &main);

        layout.minimize_panel(panel);
        layout.show_panel(panel);

        prop_assert_eq!(top_sizes(&layout), top.as_slice());
        prop_assert_eq!(main_sizes(&layout), main.as_slice());
    }

    #[test]
    fn shown_panels_never_come_back_below_the_floor(
        ops in prop::collection::vec(any::<Op>(), 1..60),
        panel in arbitrary_panel(),
    ) {
        let (mut layout, mut docs) = check_ops(ops);

        check_ops_on(
            &mut layout,
            &mut docs,
            [Op::HidePanel(panel), Op::ShowPanel(panel)],
        );

        let (region, slot) = panel.slot();
        let floor = layout.options().visibility_floor;
        prop_assert!(layout.region(region).size(slot) > floor);
    }
}
