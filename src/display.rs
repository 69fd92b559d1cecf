use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use connect4_minimax::{
    board::{Board, Cell},
    HEIGHT, WIDTH,
};

fn disc_color(cell: Cell) -> Color {
    match cell {
        Cell::Player => Color::Red,
        Cell::Ai => Color::Yellow,
        Cell::Empty => Color::DarkBlue,
    }
}

/// Draws the board in colour, column numbers on top and the bottom row last
pub fn draw(board: &Board) -> Result<()> {
    let mut out = stdout();

    let numbers: String = (1..=WIDTH).map(|column| column.to_string()).collect();
    writeln!(out, "{}", numbers)?;

    for row in (0..HEIGHT).rev() {
        for &cell in board.row(row) {
            out.queue(PrintStyledContent(
                style("O")
                    .attribute(Attribute::Bold)
                    .on(Color::DarkBlue)
                    .with(disc_color(cell)),
            ))?;
        }
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}
