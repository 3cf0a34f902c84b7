// Line commands typed at the terminal driver.
//
//   click <i> <j>   (or `c <i> <j>`, or just `<i> <j>`)
//   look            redraw the board
//   status          print what the player is holding
//   help            list commands
//   quit            exit (also `exit`, `q`, or EOF)

use cache_crafter_core::types::CellCoord;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Click(CellCoord),
    Look,
    Status,
    Help,
    Quit,
    /// A blank line.
    Empty,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        [] => Ok(Command::Empty),
        ["look" | "l"] => Ok(Command::Look),
        ["status" | "s"] => Ok(Command::Status),
        ["help" | "h" | "?"] => Ok(Command::Help),
        ["quit" | "exit" | "q"] => Ok(Command::Quit),
        ["click" | "c", i, j] => parse_coord(i, j).map(Command::Click),
        ["click" | "c", ..] => Err("usage: click <i> <j>".to_string()),
        [i, j] => parse_coord(i, j).map(Command::Click),
        [other, ..] => Err(format!("unknown command '{other}' (try 'help')")),
    }
}

fn parse_coord(i: &str, j: &str) -> Result<CellCoord, String> {
    let parse = |s: &str| {
        s.parse::<i32>()
            .map_err(|_| format!("'{s}' is not a valid cell index"))
    };
    Ok(CellCoord::new(parse(i)?, parse(j)?))
}
