use std::{
    io::{BufRead, Write},
    str::FromStr,
};

use anyhow::{anyhow, Context};

use crate::map::{layer_group::LayerKind, map_view::Viewport};

use super::controller::MapController;

const HELP: &str = "\
Commands:
  move <lon> <lat>                 move the pointer over the map
  leave                            move the pointer off the map
  click <lon> <lat>                zoom to the feature under the pointer
  toggle <zoning|schools> <on|off> show or hide a layer
  legend                           print the legend
  legend toggle                    collapse or expand the legend
  info                             print the info panel
  view                             print the viewport and tile layer
  help                             print this message
  quit                             end the session";

/// A single user input event.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Move(geo::Point),
    Leave,
    Click(geo::Point),
    Toggle { kind: LayerKind, checked: bool },
    Legend,
    ToggleLegend,
    Info,
    View,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            ["move", lon, lat] => Ok(Command::Move(parse_point(lon, lat)?)),
            ["leave"] => Ok(Command::Leave),
            ["click", lon, lat] => Ok(Command::Click(parse_point(lon, lat)?)),
            ["toggle", kind, state] => Ok(Command::Toggle {
                kind: kind.parse()?,
                checked: match *state {
                    "on" => true,
                    "off" => false,
                    other => return Err(anyhow!("Expected 'on' or 'off', got '{}'", other)),
                },
            }),
            ["legend"] => Ok(Command::Legend),
            ["legend", "toggle"] => Ok(Command::ToggleLegend),
            ["info"] => Ok(Command::Info),
            ["view"] => Ok(Command::View),
            ["help"] => Ok(Command::Help),
            ["quit"] | ["exit"] => Ok(Command::Quit),
            _ => Err(anyhow!("Unknown command '{}', try 'help'", line.trim())),
        }
    }
}

fn parse_point(lon: &str, lat: &str) -> anyhow::Result<geo::Point> {
    let lon: f64 = lon
        .parse()
        .with_context(|| format!("Invalid longitude '{}'", lon))?;
    let lat: f64 = lat
        .parse()
        .with_context(|| format!("Invalid latitude '{}'", lat))?;
    Ok(geo::Point::new(lon, lat))
}

/// Apply a command and write its visible result. Returns false once the session should end.
pub fn execute<W: Write>(
    controller: &mut MapController,
    command: Command,
    output: &mut W,
) -> anyhow::Result<bool> {
    match command {
        Command::Move(point) => {
            controller.pointer_move(point);
            write!(output, "{}", controller.info_panel())?;
        }
        Command::Leave => {
            controller.pointer_leave();
            write!(output, "{}", controller.info_panel())?;
        }
        Command::Click(point) => match controller.click_at(point) {
            Some(id) => {
                writeln!(output, "Zoomed to {} feature {}", id.kind, id.index)?;
                write_viewport(controller, output)?;
            }
            None => writeln!(output, "Nothing to click here")?,
        },
        Command::Toggle { kind, checked } => {
            controller.set_layer_visible(kind, checked);
            let active: Vec<&str> = controller
                .map()
                .active_layers()
                .iter()
                .map(|kind| kind.name())
                .collect();
            writeln!(output, "Active layers: [{}]", active.join(", "))?;
            write!(output, "{}", controller.info_panel())?;
        }
        Command::Legend => write!(output, "{}", controller.legend())?,
        Command::ToggleLegend => {
            controller.toggle_legend();
            write!(output, "{}", controller.legend())?;
        }
        Command::Info => write!(output, "{}", controller.info_panel())?,
        Command::View => {
            let tile_layer = controller.map().tile_layer();
            writeln!(
                output,
                "Tiles: {} (max zoom {})",
                tile_layer.url_template, tile_layer.max_zoom
            )?;
            writeln!(output, "Attribution: {}", tile_layer.attribution)?;
            write_viewport(controller, output)?;
        }
        Command::Help => writeln!(output, "{}", HELP)?,
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

fn write_viewport<W: Write>(controller: &MapController, output: &mut W) -> anyhow::Result<()> {
    match controller.map().viewport() {
        Viewport::Centered { center, zoom } => writeln!(
            output,
            "Viewport: center ({}, {}) zoom {}",
            center.lat, center.lon, zoom
        )?,
        Viewport::Bounds(rect) => writeln!(
            output,
            "Viewport: bounds ({}, {}) - ({}, {})",
            rect.min().x,
            rect.min().y,
            rect.max().x,
            rect.max().y
        )?,
    }
    Ok(())
}

/// Read commands line by line until the input ends or a quit command. Malformed commands are reported
/// and skipped.
pub fn run_session<R: BufRead, W: Write>(
    controller: &mut MapController,
    input: R,
    output: &mut W,
) -> anyhow::Result<()> {
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match line.parse::<Command>() {
            Ok(command) => {
                if !execute(controller, command, output)? {
                    break;
                }
            }
            Err(err) => writeln!(output, "Error: {}", err)?,
        }
        output.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rstest::rstest;

    use super::{run_session, Command};
    use crate::{
        geofile::feature::Feature,
        interaction::controller::MapController,
        map::{
            layer_group::LayerKind,
            map_view::{MapView, TileLayerConfig, ViewConfig},
        },
        style::palette::Palette,
    };

    #[rstest]
    #[case("move -72.9 41.4", Command::Move(geo::Point::new(-72.9, 41.4)))]
    #[case("  click 1 2 ", Command::Click(geo::Point::new(1.0, 2.0)))]
    #[case("leave", Command::Leave)]
    #[case("toggle zoning off", Command::Toggle { kind: LayerKind::Zoning, checked: false })]
    #[case("toggle schools on", Command::Toggle { kind: LayerKind::School, checked: true })]
    #[case("legend", Command::Legend)]
    #[case("legend toggle", Command::ToggleLegend)]
    #[case("exit", Command::Quit)]
    fn test_parse_command(#[case] line: &str, #[case] expected: Command) {
        assert_eq!(expected, line.parse::<Command>().unwrap());
    }

    #[rstest]
    #[case("move 1")]
    #[case("move east north")]
    #[case("toggle parcels on")]
    #[case("toggle zoning maybe")]
    #[case("zoom 3")]
    fn test_parse_invalid_command(#[case] line: &str) {
        assert!(line.parse::<Command>().is_err());
    }

    fn controller() -> MapController {
        let map = MapView::new(&ViewConfig::default(), TileLayerConfig::default());
        let mut controller =
            MapController::new(map, Palette::default_zoning(), Palette::default_school());
        let school = Feature {
            geometry: geo::Geometry::Polygon(geo::Rect::new((0.0, 0.0), (2.0, 2.0)).to_polygon()),
            attributes: Some(HashMap::from([
                ("school_name".to_string(), "Bear Path".to_string()),
                ("address".to_string(), "X".to_string()),
            ])),
        };
        controller.add_features(LayerKind::School, &[school]);
        controller
    }

    #[rstest]
    fn test_run_session() {
        let input = "# scripted session\n\nmove 1 1\nbogus\ntoggle schools off\nquit\ninfo\n";
        let mut output = Vec::new();
        let mut controller = controller();
        run_session(&mut controller, input.as_bytes(), &mut output).unwrap();
        let output = String::from_utf8(output).unwrap();

        assert!(output.starts_with(
            "== Area Information ==\nElementary School: Bear Path\nSchool Address: X\n"
        ));
        assert!(output.contains("Error: Unknown command 'bogus'"));
        assert!(output.contains("Active layers: [zoning]\n== Hover over an area =="));
        // Nothing after quit is executed.
        assert_eq!(1, output.matches("== Hover over an area ==").count());
    }

    #[rstest]
    fn test_click_reports_bounds() {
        let mut output = Vec::new();
        let mut controller = controller();
        run_session(&mut controller, "click 1 1\nclick 5 5\n".as_bytes(), &mut output).unwrap();
        assert_eq!(
            "Zoomed to schools feature 0\nViewport: bounds (0, 0) - (2, 2)\nNothing to click here\n",
            String::from_utf8(output).unwrap()
        );
    }
}
