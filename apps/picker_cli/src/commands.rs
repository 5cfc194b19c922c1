use std::collections::BTreeSet;

use anyhow::{bail, Context};
use shared::domain::Coordinates;

pub const USAGE: &str = "\
commands:
  type <text>                          keystroke in the address field
  clear                                empty the address field
  blur                                 leave the field, committing typed text
  search                               explicit search (button / Enter)
  suggest <query>                      list autocomplete predictions
  pick <place_id>                      choose a prediction
  select <lat> <lng> <types|-> <addr>  apply a place result directly
  drag <lat> <lng>                     drop the marker
  locate                               use the device location
  props <lat> <lng> <addr>             parent re-render (0 0 for no coordinates)
  state                                print the current snapshot
  quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Type(String),
    Clear,
    Blur,
    Search,
    Suggest(String),
    Pick(String),
    Select {
        coordinates: Coordinates,
        place_types: BTreeSet<String>,
        address: String,
    },
    Drag(Coordinates),
    Locate,
    Props {
        coordinates: Option<Coordinates>,
        address: String,
    },
    State,
    Help,
    Quit,
}

/// Parses one stdin line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> anyhow::Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "type" => Command::Type(rest.to_string()),
        "clear" => Command::Clear,
        "blur" => Command::Blur,
        "search" => Command::Search,
        "suggest" => Command::Suggest(required(rest, "suggest <query>")?),
        "pick" => Command::Pick(required(rest, "pick <place_id>")?),
        "select" => {
            let mut parts = rest.splitn(4, char::is_whitespace);
            let coordinates = parse_coordinates(parts.next(), parts.next())?;
            let place_types = match parts.next() {
                Some("-") | None => BTreeSet::new(),
                Some(types) => types
                    .split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect(),
            };
            let address = required(parts.next().unwrap_or_default(), "select <lat> <lng> <types|-> <address>")?;
            Command::Select {
                coordinates,
                place_types,
                address,
            }
        }
        "drag" => {
            let mut parts = rest.split_whitespace();
            Command::Drag(parse_coordinates(parts.next(), parts.next())?)
        }
        "locate" => Command::Locate,
        "props" => {
            let mut parts = rest.splitn(3, char::is_whitespace);
            let coordinates = parse_coordinates(parts.next(), parts.next())?;
            Command::Props {
                coordinates: coordinates.known(),
                address: parts.next().unwrap_or_default().trim().to_string(),
            }
        }
        "state" => Command::State,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command '{other}' (try 'help')"),
    };
    Ok(Some(command))
}

fn required(rest: &str, usage: &str) -> anyhow::Result<String> {
    let rest = rest.trim();
    if rest.is_empty() {
        bail!("usage: {usage}");
    }
    Ok(rest.to_string())
}

fn parse_coordinates(lat: Option<&str>, lng: Option<&str>) -> anyhow::Result<Coordinates> {
    let (Some(lat), Some(lng)) = (lat, lng) else {
        bail!("expected <lat> <lng>");
    };
    let lat: f64 = lat.parse().with_context(|| format!("invalid latitude '{lat}'"))?;
    let lng: f64 = lng.parse().with_context(|| format!("invalid longitude '{lng}'"))?;
    Ok(Coordinates::new(lat, lng)?)
}
