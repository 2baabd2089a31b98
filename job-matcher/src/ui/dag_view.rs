//! Terminal painting of the pipeline graph
//!
//! Nodes are bordered boxes placed on the grid from [`crate::dag`]. Edges
//! are routed down from the bottom centre of a node, across on the middle
//! row of the gap, and down into the top centre of the next node. Cells
//! shared by several edges get the matching junction glyph.

use std::collections::{BTreeMap, HashMap};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use job_matcher_sdk::Stage;

use crate::dag::{self, DagGraph, DagNode, GRID_COLUMNS, GRID_ROWS};

const NODE_HEIGHT: u16 = 4;
const MIN_GAP: u16 = 2;
const MAX_GAP: u16 = 4;
const MIN_NODE_WIDTH: u16 = 14;
const MAX_NODE_WIDTH: u16 = 28;

const UP: u8 = 1;
const DOWN: u8 = 2;
const LEFT: u8 = 4;
const RIGHT: u8 = 8;

const ARROW: &str = "▼";

pub struct DagWidget<'a> {
    graph: &'a DagGraph,
    tick: u64,
}

impl<'a> DagWidget<'a> {
    pub fn new(graph: &'a DagGraph, tick: u64) -> Self {
        Self { graph, tick }
    }
}

/// Rectangle of every node inside `area`, or `None` when it does not fit
pub fn node_rects(area: Rect) -> Option<BTreeMap<Stage, Rect>> {
    let rows = GRID_ROWS;
    let min_height = rows * NODE_HEIGHT + (rows - 1) * MIN_GAP;
    let column_width = area.width / GRID_COLUMNS;
    if area.height < min_height || column_width < MIN_NODE_WIDTH + 2 {
        return None;
    }

    let gap = ((area.height - rows * NODE_HEIGHT) / (rows - 1)).min(MAX_GAP);
    let node_width = (column_width - 2).min(MAX_NODE_WIDTH);
    let used_height = rows * NODE_HEIGHT + (rows - 1) * gap;
    let top = area.y + (area.height - used_height) / 2;

    let rects = Stage::ALL
        .iter()
        .map(|stage| {
            let pos = dag::position(*stage);
            let x = area.x + pos.column * column_width + (column_width - node_width) / 2;
            let y = top + pos.row * (NODE_HEIGHT + gap);
            (*stage, Rect::new(x, y, node_width, NODE_HEIGHT))
        })
        .collect();
    Some(rects)
}

/// Cells of one edge with the directions each cell connects to
fn route(from: Rect, to: Rect) -> Vec<((u16, u16), u8)> {
    let x1 = from.x + from.width / 2;
    let y1 = from.y + from.height;
    let x2 = to.x + to.width / 2;
    let y2 = to.y.saturating_sub(1);
    if y2 < y1 {
        return Vec::new();
    }

    let mut cells = Vec::new();
    if x1 == x2 {
        for y in y1..=y2 {
            cells.push(((x1, y), UP | DOWN));
        }
        return cells;
    }

    let mid = y1 + (y2 - y1) / 2;
    let (toward_to, toward_from) = if x2 > x1 { (RIGHT, LEFT) } else { (LEFT, RIGHT) };

    for y in y1..mid {
        cells.push(((x1, y), UP | DOWN));
    }
    cells.push(((x1, mid), UP | toward_to));
    for x in x1.min(x2) + 1..x1.max(x2) {
        cells.push(((x, mid), LEFT | RIGHT));
    }
    cells.push(((x2, mid), DOWN | toward_from));
    for y in mid + 1..=y2 {
        cells.push(((x2, y), UP | DOWN));
    }
    cells
}

fn glyph(directions: u8, dashed: bool) -> &'static str {
    match directions {
        d if d == UP | DOWN || d == UP || d == DOWN => {
            if dashed {
                "┆"
            } else {
                "│"
            }
        }
        d if d == LEFT | RIGHT || d == LEFT || d == RIGHT => {
            if dashed {
                "┄"
            } else {
                "─"
            }
        }
        d if d == DOWN | RIGHT => "┌",
        d if d == DOWN | LEFT => "┐",
        d if d == UP | RIGHT => "└",
        d if d == UP | LEFT => "┘",
        d if d == UP | DOWN | RIGHT => "├",
        d if d == UP | DOWN | LEFT => "┤",
        d if d == LEFT | RIGHT | DOWN => "┬",
        d if d == LEFT | RIGHT | UP => "┴",
        _ => "┼",
    }
}

impl DagWidget<'_> {
    fn render_edges(&self, rects: &BTreeMap<Stage, Rect>, buf: &mut Buffer) {
        // (directions, animated)
        let mut cells: HashMap<(u16, u16), (u8, bool)> = HashMap::new();
        let mut arrows = Vec::new();

        for edge in &self.graph.edges {
            let (Some(from), Some(to)) = (rects.get(&edge.edge.from), rects.get(&edge.edge.to))
            else {
                continue;
            };
            let route = route(*from, *to);
            if let Some((end, _)) = route.last() {
                arrows.push((*end, edge.animated));
            }
            for (cell, directions) in route {
                let entry = cells.entry(cell).or_insert((0, false));
                entry.0 |= directions;
                entry.1 |= edge.animated;
            }
        }

        let phase = (self.tick / 4) % 2;
        for ((x, y), (directions, animated)) in cells {
            let dashed = animated && (u64::from(x) + u64::from(y) + phase) % 2 == 0;
            let style = edge_style(animated);
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_symbol(glyph(directions, dashed)).set_style(style);
            }
        }
        for ((x, y), animated) in arrows {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_symbol(ARROW).set_style(edge_style(animated));
            }
        }
    }

    fn render_node(node: &DagNode, area: Rect, buf: &mut Buffer) {
        let border = Style::default().fg(node.color);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(Span::styled(
                format!(" {}. {} ", node.stage.node_number(), node.label),
                border.add_modifier(Modifier::BOLD),
            ));

        let lines = vec![
            Line::from(Span::styled(
                node.badge.clone(),
                Style::default().fg(node.color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                node.description,
                Style::default().fg(Color::DarkGray),
            )),
        ];
        Paragraph::new(lines).block(block).render(area, buf);
    }

    fn render_compact(&self, area: Rect, buf: &mut Buffer) {
        let lines: Vec<Line> = self
            .graph
            .nodes
            .iter()
            .map(|node| {
                Line::from(vec![
                    Span::raw(format!("{}. {:<14} ", node.stage.node_number(), node.label)),
                    Span::styled(
                        node.badge.clone(),
                        Style::default().fg(node.color).add_modifier(Modifier::BOLD),
                    ),
                ])
            })
            .collect();
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

fn edge_style(animated: bool) -> Style {
    if animated {
        Style::default().fg(dag::EDGE_COLOR)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

impl Widget for DagWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(rects) = node_rects(area) else {
            self.render_compact(area, buf);
            return;
        };

        self.render_edges(&rects, buf);
        for node in &self.graph.nodes {
            if let Some(rect) = rects.get(&node.stage) {
                Self::render_node(node, *rect, buf);
            }
        }
    }
}
