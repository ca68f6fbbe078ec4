//! Render a small layout without a terminal and print the result.
//!
//! Run with `cargo run --example headless`.

use curses::emulator::Emulator;
use curses::*;

fn main() -> Result<()> {
    let curses = Curses::new(Emulator::builder().size(12, 40).tabsize(4).build());
    let stdwin = curses.initscr()?;
    curses.start_color()?;
    curses.try_init_pair(1, Color::Cyan.into(), Color::Black.into())?;

    stdwin.draw_box(0, 0);
    stdwin.addstr(0, 2, " status ", (Attribute::REVERSE | Attribute::BOLD).into());

    let panel = stdwin.derwin(6, 20, 2, 2)?;
    panel.draw_box(0, 0);
    panel.attron(curses.color_pair(1))?;
    for (i, item) in ["alpha", "beta", "gamma"].iter().enumerate() {
        mvwprintw!(panel, 1 + i as i32, 2, 0, "{}.\t{}", i + 1, item);
    }
    panel.attroff(curses.color_pair(1))?;

    // Stage both windows, then update once.
    panel.noutrefresh()?;
    stdwin.noutrefresh()?;
    curses.doupdate()?;

    let screen = curses.native();
    for y in 0..curses.rows() {
        if let Some(line) = screen.screen_line(y) {
            println!("{}", line);
        }
    }
    println!(
        "{} lines repainted, {} windows live",
        screen.last_update_lines(),
        screen.live_windows()
    );

    panel.delwin()?;
    curses.endwin()
}
