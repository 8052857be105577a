use blockmap_wasm::config::HeatmapConfig;
use blockmap_wasm::domain::chain_data::{BlockRecord, Dataset, DayRecord};
use blockmap_wasm::domain::heatmap::{CalendarDate, Color, ColorField, ColorScaleKind, WorldRect};
use blockmap_wasm::infrastructure::rendering::{
    CanvasSize, CellDetail, DrawCommand, LodRenderer, RecordingSurface, RenderLoop,
};
use blockmap_wasm::view_state::ViewState;

const GENESIS: i64 = 1_231_006_505;

fn day(year: i32, month: u32, day: u32, transactions: u64) -> DayRecord {
    DayRecord {
        date: CalendarDate::new(year, month, day).unwrap(),
        transaction_count: transactions,
        byte_size: 285 * transactions,
        minted_value: 5_000_000_000,
        output_value: 5_000_000_000,
        difficulty: 1.0,
        price_usd: None,
    }
}

fn block(height: u64, timestamp: i64, transactions: u64) -> BlockRecord {
    BlockRecord {
        height,
        timestamp,
        transaction_count: transactions,
        byte_size: 285,
        minted_value: 5_000_000_000,
        output_value: 5_000_000_000,
        difficulty: 1.0,
    }
}

fn genesis_only() -> Dataset {
    Dataset::from_records(vec![day(2009, 0, 3, 1)], vec![block(0, GENESIS, 1)])
}

fn render(dataset: &Dataset, view: ViewState, canvas: CanvasSize, through_year: i32) -> RecordingSurface {
    let mut surface = RecordingSurface::new();
    RenderLoop::new(&HeatmapConfig::default(), through_year)
        .render(&mut surface, canvas, dataset, &view, ColorField::TransactionCount, ColorScaleKind::Linear)
        .unwrap();
    surface
}

#[test]
fn only_the_visible_month_is_drawn() {
    // visible world rect is exactly January 2010
    let surface = render(&genesis_only(), ViewState::new(1.0, 80.0, 126.0), CanvasSize::new(54.0, 46.0), 2010);
    assert_eq!(surface.fill_rect_count(), 31);
    assert!(surface.fill_rects().all(|(_, color)| *color == Color::NO_VALUE));
}

#[test]
fn genesis_day_is_low_anchor_and_rest_of_january_is_empty() {
    let surface = render(&genesis_only(), ViewState::new(1.0, 0.0, 0.0), CanvasSize::new(800.0, 600.0), 2009);
    let january: Vec<(&WorldRect, &Color)> = surface
        .fill_rects()
        .filter(|(rect, _)| rect.x >= 80.0 && rect.right() <= 134.0 && rect.y >= 50.0 && rect.bottom() <= 96.0)
        .collect();
    assert_eq!(january.len(), 31);

    let (genesis, others): (Vec<_>, Vec<_>) = january.into_iter().partition(|(rect, _)| (rect.x, rect.y) == (120.0, 50.0));
    assert_eq!(genesis.len(), 1);
    assert_eq!(*genesis[0].1, Color::LOW_ANCHOR);
    assert_eq!(others.len(), 30);
    assert!(others.iter().all(|(_, color)| **color == Color::NO_VALUE));
}

#[test]
fn empty_dataset_draws_nothing_but_clears() {
    let surface = render(&Dataset::empty(), ViewState::new(1.0, 0.0, 0.0), CanvasSize::new(800.0, 600.0), 2024);
    assert_eq!(surface.commands().len(), 2);
    assert!(matches!(surface.commands()[0], DrawCommand::Clear { .. }));
}

#[test]
fn detail_threshold_switches_to_block_grid() {
    let blocks: Vec<BlockRecord> = (0..5).map(|i| block(i, GENESIS + i as i64 * 600, i + 1)).collect();
    let dataset = Dataset::from_records(vec![day(2009, 0, 3, 5), day(2009, 0, 4, 1)], blocks.clone());
    let config = HeatmapConfig::default();
    let lod = LodRenderer::new(&config, &dataset, ColorField::TransactionCount, ColorScaleKind::Linear);
    let date = CalendarDate::new(2009, 0, 3).unwrap();
    let cell = WorldRect::new(120.0, 50.0, 6.0, 6.0);
    let record = dataset.day(date);

    let mut coarse = RecordingSurface::new();
    let detail = lod.render_cell(&mut coarse, date, cell, record, &blocks, &ViewState::new(3.99, 0.0, 0.0)).unwrap();
    assert_eq!(detail, CellDetail::Aggregate);
    assert_eq!(coarse.fill_rect_count(), 1);

    let mut fine = RecordingSurface::new();
    let detail = lod.render_cell(&mut fine, date, cell, record, &blocks, &ViewState::new(4.01, 0.0, 0.0)).unwrap();
    assert_eq!(detail, CellDetail::Blocks(5));
    assert_eq!(fine.fill_rect_count(), 5);
    // sub-cells are laid out row-major inside the day cell
    let rects: Vec<&WorldRect> = fine.fill_rects().map(|(rect, _)| rect).collect();
    assert!(rects.windows(2).all(|w| w[0].x < w[1].x && w[0].y == w[1].y));
    assert!(rects.iter().all(|r| r.right() <= cell.right() + 1e-9));
    // day domain is [1, 5], so blocks with 1..=5 transactions span the ramp
    assert_eq!(*fine.fill_rects().next().unwrap().1, Color::LOW_ANCHOR);
    assert_eq!(*fine.fill_rects().last().unwrap().1, Color::HIGH_ANCHOR);
}

#[test]
fn sub_cells_are_colored_against_the_day_domain() {
    let blocks: Vec<BlockRecord> = (0..5).map(|i| block(i, GENESIS + i as i64 * 600, i + 1)).collect();
    let dataset = Dataset::from_records(vec![day(2009, 0, 3, 10), day(2009, 0, 9, 300)], blocks.clone());
    let lod = LodRenderer::new(&HeatmapConfig::default(), &dataset, ColorField::TransactionCount, ColorScaleKind::Linear);
    let date = CalendarDate::new(2009, 0, 3).unwrap();

    let mut surface = RecordingSurface::new();
    lod.render_cell(&mut surface, date, WorldRect::new(120.0, 50.0, 6.0, 6.0), dataset.day(date), &blocks, &ViewState::new(6.0, 0.0, 0.0))
        .unwrap();
    assert_eq!(surface.fill_rect_count(), 5);
    // every block is below the day minimum of 10 and clamps to the low anchor
    assert!(surface.fill_rects().all(|(_, color)| *color == Color::LOW_ANCHOR));
}

#[test]
fn sub_grid_wraps_after_thirteen_blocks() {
    let blocks: Vec<BlockRecord> = (0..14).map(|i| block(i, GENESIS + i as i64 * 60, 1)).collect();
    let dataset = Dataset::from_records(vec![day(2009, 0, 3, 14)], blocks.clone());
    let lod = LodRenderer::new(&HeatmapConfig::default(), &dataset, ColorField::TransactionCount, ColorScaleKind::Linear);
    let date = CalendarDate::new(2009, 0, 3).unwrap();
    let mut surface = RecordingSurface::new();
    lod.render_cell(&mut surface, date, WorldRect::new(0.0, 0.0, 6.0, 6.0), dataset.day(date), &blocks, &ViewState::new(5.0, 0.0, 0.0))
        .unwrap();
    let rects: Vec<&WorldRect> = surface.fill_rects().map(|(rect, _)| rect).collect();
    assert_eq!(rects[13].x, 0.0);
    assert!(rects[13].y > rects[12].y);
}

#[test]
fn zoomed_frame_labels_months_and_days() {
    let dataset = genesis_only();
    let view = ViewState::new(25.0, 120.0 * 25.0, 50.0 * 25.0);
    let surface = render(&dataset, view, CanvasSize::new(200.0, 200.0), 2009);
    let texts: Vec<&str> = surface.labels().map(|l| l.text.as_str()).collect();
    assert!(texts.contains(&"2009-01"));
    assert!(texts.contains(&"2009-01-03"));
    // one sub-cell for the single genesis block
    assert_eq!(surface.fill_rects().filter(|(r, _)| r.width < 6.0).count(), 1);
}

fn describe(command: &DrawCommand) -> String {
    match command {
        DrawCommand::Clear { size } => format!("clear {}x{}", size.width, size.height),
        DrawCommand::ApplyView { scale, offset_x, offset_y } => {
            format!("view scale={} offset=({}, {})", scale, offset_x, offset_y)
        }
        DrawCommand::FillRect { rect, color } => {
            format!("rect {} {} {}x{} {}", rect.x, rect.y, rect.width, rect.height, color)
        }
        DrawCommand::FillText { label } => format!("text {:?} at ({}, {})", label.text, label.x, label.y),
    }
}

#[test]
fn single_cell_frame() {
    let surface = render(&genesis_only(), ViewState::new(1.0, 120.0, 50.0), CanvasSize::new(6.0, 6.0), 2009);
    let frame = surface.commands().iter().map(describe).collect::<Vec<_>>().join("\n");
    insta::assert_snapshot!(frame, @r###"
    clear 6x6
    view scale=1 offset=(120, 50)
    text "Jan" at (80, 36)
    text "Feb" at (154, 36)
    text "Mar" at (228, 36)
    text "Apr" at (302, 36)
    text "May" at (376, 36)
    text "Jun" at (450, 36)
    text "Jul" at (524, 36)
    text "Aug" at (598, 36)
    text "Sep" at (672, 36)
    text "Oct" at (746, 36)
    text "Nov" at (820, 36)
    text "Dec" at (894, 36)
    text "2009" at (10, 73)
    rect 120 50 6x6 rgb(16, 185, 129)
    "###);
}

#[test]
fn overview_label_texts() {
    let surface = render(&genesis_only(), ViewState::new(1.0, 0.0, 0.0), CanvasSize::new(100.0, 100.0), 2010);
    let texts: Vec<&str> = surface.labels().map(|l| l.text.as_str()).collect();
    insta::assert_json_snapshot!(texts, @r###"
    [
      "Jan",
      "Feb",
      "Mar",
      "Apr",
      "May",
      "Jun",
      "Jul",
      "Aug",
      "Sep",
      "Oct",
      "Nov",
      "Dec",
      "2009",
      "2010"
    ]
    "###);
}
