//! Simple "Hello World" on the real terminal.
//!
//! Run with `cargo run --example hello --features ncurses`.

use curses::*;

fn main() -> Result<()> {
    let curses = Curses::new(Ncurses);
    let stdwin = curses.initscr()?;

    // Optional: colors if the terminal supports them
    let colored = curses.start_color().is_ok();
    if colored {
        curses.init_pair(1, COLOR_GREEN, COLOR_BLACK);
        curses.init_pair(2, COLOR_YELLOW, COLOR_BLACK);
    }

    curses.cbreak()?;
    curses.noecho()?;
    let previous_cursor = curses.curs_set(CursorVisibility::Hidden).ok();
    stdwin.keypad(true)?;
    stdwin.clear()?;

    // Centered title
    let title = "Welcome to curses!";
    let y = curses.rows() / 2 - 2;
    let x = (curses.cols() - title.len() as i32) / 2;
    stdwin.addstr(y, x, title, 0);

    let green = if colored { curses.color_pair(1) } else { A_NORMAL };
    stdwin.attron(A_BOLD)?;
    stdwin.addstr(y + 2, x - 5, "A thin binding over ncurses", green);
    stdwin.attroff(A_BOLD)?;

    let yellow = if colored { curses.color_pair(2) } else { A_NORMAL };
    mvwprintw!(
        stdwin,
        y + 5,
        x - 3,
        yellow,
        "Terminal is {}x{}, press any key",
        curses.cols(),
        curses.rows()
    );

    stdwin.draw_box(0, 0);
    stdwin.refresh()?;

    let key = stdwin.getch();

    if let Some(cursor) = previous_cursor {
        curses.curs_set(cursor)?;
    }
    curses.endwin()?;
    println!("You pressed {:?}", Key::from_code(key));
    Ok(())
}
