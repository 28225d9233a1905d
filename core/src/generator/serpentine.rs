use smallvec::SmallVec;

use super::*;

/// The fixed 8x7 course: four full rows joined by single-cell bridges,
/// traversal alternating left-to-right and right-to-left.
pub const SERPENTINE_ROWS: [RowSpec; ROW_COUNT as usize] = [
    RowSpec {
        cells: RowCells::Full(ParityRule {
            even: CellKind::Normal,
            odd: CellKind::Special,
            starts_path: true,
        }),
        mirror_x: false,
        reverse: false,
    },
    RowSpec {
        cells: RowCells::Bridge {
            col: COL_COUNT - 1,
            kind: CellKind::Normal,
        },
        mirror_x: false,
        reverse: false,
    },
    RowSpec {
        cells: RowCells::Full(ParityRule {
            even: CellKind::Special,
            odd: CellKind::Normal,
            starts_path: false,
        }),
        mirror_x: false,
        reverse: true,
    },
    RowSpec {
        cells: RowCells::Bridge {
            col: 0,
            kind: CellKind::Special,
        },
        mirror_x: true,
        reverse: false,
    },
    RowSpec {
        cells: RowCells::Full(ParityRule {
            even: CellKind::Normal,
            odd: CellKind::Special,
            starts_path: false,
        }),
        mirror_x: false,
        reverse: false,
    },
    RowSpec {
        cells: RowCells::Bridge {
            col: COL_COUNT - 1,
            kind: CellKind::Normal,
        },
        mirror_x: false,
        reverse: false,
    },
    RowSpec {
        cells: RowCells::Full(ParityRule {
            even: CellKind::Special,
            odd: CellKind::Normal,
            starts_path: false,
        }),
        mirror_x: true,
        reverse: true,
    },
];

/// Generation strategy that runs one generic row-builder pass over a
/// declarative row table. Deterministic, always produces the same course.
#[derive(Clone, Debug, PartialEq)]
pub struct SerpentineGenerator {
    cols: Coord,
    rows: &'static [RowSpec],
}

impl SerpentineGenerator {
    pub fn new(cols: Coord, rows: &'static [RowSpec]) -> Self {
        Self { cols, rows }
    }

    fn build_row(
        &self,
        y: Coord,
        spec: &RowSpec,
        next_order: &mut StepOrder,
    ) -> SmallVec<[Cell; COL_COUNT as usize]> {
        let mut row = SmallVec::new();

        for i in 0..self.cols {
            let x = if spec.mirror_x { self.cols - 1 - i } else { i };
            let position = (x, y);

            let cell = match spec.cells {
                RowCells::Full(rule) => {
                    let kind = if rule.starts_path && i == 0 {
                        CellKind::Start
                    } else if i % 2 == 0 {
                        rule.even
                    } else {
                        rule.odd
                    };
                    *next_order += 1;
                    Cell::path(*next_order, kind, position)
                }
                RowCells::Bridge { col, kind } if i == col => {
                    *next_order += 1;
                    Cell::path(*next_order, kind, position)
                }
                RowCells::Bridge { .. } => Cell::filler(position),
            };
            row.push(cell);
        }

        if spec.reverse {
            row.reverse();
        }
        row
    }
}

impl Default for SerpentineGenerator {
    fn default() -> Self {
        Self::new(COL_COUNT, &SERPENTINE_ROWS)
    }
}

impl BoardGenerator for SerpentineGenerator {
    fn generate(self) -> BoardLayout {
        let rows = self.rows.len() as Coord;
        let mut cells = Vec::with_capacity(mult(self.cols, rows) as usize);
        let mut next_order: StepOrder = 0;

        for (y, spec) in self.rows.iter().enumerate() {
            cells.extend(self.build_row(y as Coord, spec, &mut next_order));
        }

        if cells.len() != mult(COL_COUNT, ROW_COUNT) as usize {
            log::warn!(
                "Generated course has {} cells instead of {}x{}, rendering will be best-effort",
                cells.len(),
                COL_COUNT,
                ROW_COUNT
            );
        }

        BoardLayout::from_cells((self.cols, rows), cells)
            .expect("row specs fill the declared grid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course() -> BoardLayout {
        SerpentineGenerator::default().generate()
    }

    #[test]
    fn course_has_56_cells_and_35_path_steps() {
        let layout = course();
        assert_eq!(layout.size(), (8, 7));
        assert_eq!(layout.total_cells(), 56);
        assert_eq!(layout.max_order(), 35);
    }

    #[test]
    fn path_orders_are_dense_and_unique() {
        let layout = course();
        let (cols, rows) = layout.size();

        let mut orders: Vec<StepOrder> = Vec::new();
        for y in 0..rows {
            for x in 0..cols {
                let order = layout.cell_at((x, y)).order;
                if order > 0 {
                    orders.push(order);
                }
            }
        }
        orders.sort_unstable();

        let expected: Vec<StepOrder> = (1..=35).collect();
        assert_eq!(orders, expected);
    }

    #[test]
    fn fillers_have_no_order_and_no_reward() {
        let layout = course();
        let (cols, rows) = layout.size();

        for y in 0..rows {
            for x in 0..cols {
                let cell = layout.cell_at((x, y));
                if cell.kind == CellKind::Empty {
                    assert_eq!(cell.order, 0);
                    assert_eq!(cell.reward, "");
                }
            }
        }
    }

    #[test]
    fn orders_snake_through_the_render_slots() {
        let layout = course();

        assert_eq!(layout.cell_at((0, 0)).order, 1);
        assert_eq!(layout.cell_at((7, 0)).order, 8);
        assert_eq!(layout.cell_at((7, 1)).order, 9);
        assert_eq!(layout.cell_at((7, 2)).order, 10);
        assert_eq!(layout.cell_at((0, 2)).order, 17);
        assert_eq!(layout.cell_at((0, 3)).order, 18);
        assert_eq!(layout.cell_at((0, 4)).order, 19);
        assert_eq!(layout.cell_at((7, 4)).order, 26);
        assert_eq!(layout.cell_at((7, 5)).order, 27);
        assert_eq!(layout.cell_at((7, 6)).order, 28);
        assert_eq!(layout.cell_at((0, 6)).order, 35);
    }

    #[test]
    fn kinds_follow_the_row_table() {
        let layout = course();

        assert_eq!(layout.cell_by_order(1).unwrap().kind, CellKind::Start);
        // full rows alternate by column parity
        assert_eq!(layout.cell_by_order(2).unwrap().kind, CellKind::Special);
        assert_eq!(layout.cell_by_order(3).unwrap().kind, CellKind::Normal);
        assert_eq!(layout.cell_by_order(8).unwrap().kind, CellKind::Special);
        // bridges
        assert_eq!(layout.cell_by_order(9).unwrap().kind, CellKind::Normal);
        assert_eq!(layout.cell_by_order(18).unwrap().kind, CellKind::Special);
        assert_eq!(layout.cell_by_order(27).unwrap().kind, CellKind::Normal);
        // the last step keeps its parity kind, it is not a distinct end marker
        assert_eq!(layout.cell_by_order(35).unwrap().kind, CellKind::Normal);
        assert_eq!(layout.cell_by_order(28).unwrap().kind, CellKind::Special);
    }

    #[test]
    fn mirrored_rows_keep_generation_positions() {
        let layout = course();

        // row 2 is reversed in render order but positions stay x = i
        assert_eq!(layout.cell_at((0, 2)).position, (7, 2));
        assert_eq!(layout.cell_at((7, 2)).position, (0, 2));
        // the row 3 bridge records the mirrored x even though it renders at slot 0
        let bridge = layout.cell_at((0, 3));
        assert_eq!(bridge.order, 18);
        assert_eq!(bridge.position, (7, 3));
        // row 6 is mirrored and reversed, so positions line up with slots again
        assert_eq!(layout.cell_at((0, 6)).position, (0, 6));
        assert_eq!(layout.cell_at((7, 6)).position, (7, 6));
    }

    #[test]
    fn rewards_match_cell_kinds() {
        let layout = course();

        assert_eq!(layout.cell_by_order(2).unwrap().reward, SPECIAL_REWARD);
        assert_eq!(layout.cell_by_order(1).unwrap().reward, PATH_REWARD);
        assert_eq!(layout.cell_by_order(9).unwrap().reward, PATH_REWARD);
    }

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(course(), course());
    }
}
