//! Line-driven interactive session over the calculator.
//!
//! Each input line is one user action (click, type, Enter, Escape, slider
//! move, target switch). State changes reach the printer through the
//! calculator's observer callback.

use bmi_core::editor::format_value;
use bmi_core::{Calculator, EditOutcome, Error, Measurement, Result, Theme, Variable};
use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::rc::Rc;

const HELP: &str = "\
Commands:
  target <weight|height|bmi>   solve for this variable
  click <field>                start editing a field
  type <text>                  replace the draft text
  enter                        commit the draft
  blur                         leave the field (commits)
  escape                       cancel editing
  slide <field> <value>        move a slider
  show                         print the current state
  help                         show this help
  quit                         leave the session";

/// Run the session until `quit` or end of input
pub fn run<R: BufRead, W: Write>(
    mut calc: Calculator,
    theme: Theme,
    input: R,
    mut out: W,
) -> Result<()> {
    let changes: Rc<RefCell<Vec<Measurement>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&changes);
    calc.subscribe(move |state| sink.borrow_mut().push(*state));

    writeln!(out, "BMI calculator session ({} theme). Type 'help' for commands.", theme.name())?;
    print_state(&mut out, calc.state())?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command.to_lowercase().as_str() {
            "quit" | "exit" => break,
            "help" => writeln!(out, "{}", HELP)?,
            "show" => print_state(&mut out, calc.state())?,
            "target" => match rest.parse::<Variable>() {
                Ok(target) => {
                    calc.select_target(target);
                }
                Err(e) => writeln!(out, "! {}", e)?,
            },
            "click" | "tap" => match rest.parse::<Variable>() {
                Ok(field) => {
                    let outcome = calc.click(field);
                    describe(&mut out, &calc, field, &outcome)?;
                }
                Err(e) => writeln!(out, "! {}", e)?,
            },
            "type" => {
                let outcome = calc.type_text(rest);
                if outcome == EditOutcome::Ignored {
                    writeln!(out, "! no field is being edited")?;
                }
            }
            "enter" => finish(&mut out, &mut calc, Calculator::press_enter)?,
            "blur" => finish(&mut out, &mut calc, Calculator::blur)?,
            "escape" | "esc" => finish(&mut out, &mut calc, Calculator::press_escape)?,
            "slide" => slide(&mut out, &mut calc, rest)?,
            other => writeln!(out, "! unknown command '{}'", other)?,
        }

        for state in changes.borrow_mut().drain(..) {
            print_state(&mut out, &state)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn finish<W: Write>(
    out: &mut W,
    calc: &mut Calculator,
    action: fn(&mut Calculator) -> EditOutcome,
) -> Result<()> {
    let field = calc.editing().map(|e| e.field());
    let outcome = action(calc);
    match field {
        Some(field) => describe(out, calc, field, &outcome),
        None => {
            writeln!(out, "! no field is being edited")?;
            Ok(())
        }
    }
}

fn slide<W: Write>(out: &mut W, calc: &mut Calculator, args: &str) -> Result<()> {
    let mut parts = args.split_whitespace();
    let (Some(field), Some(value)) = (parts.next(), parts.next()) else {
        writeln!(out, "! usage: slide <field> <value>")?;
        return Ok(());
    };

    let result = field.parse::<Variable>().and_then(|field| {
        let value: f64 = value
            .parse()
            .map_err(|_| Error::InvalidInput(format!("'{}' is not a number", value)))?;
        calc.slide(field, value).map(|_| ())
    });
    if let Err(e) = result {
        writeln!(out, "! {}", e)?;
    }
    Ok(())
}

fn describe<W: Write>(
    out: &mut W,
    calc: &Calculator,
    field: Variable,
    outcome: &EditOutcome,
) -> Result<()> {
    match outcome {
        EditOutcome::Started => {
            let draft = calc.editing().and_then(|e| e.draft()).unwrap_or_default();
            writeln!(out, "editing {}: {}", field, draft)?;
        }
        EditOutcome::Ignored if calc.state().is_derived(field) => {
            writeln!(out, "{} is derived; select another target to edit it", field)?;
        }
        EditOutcome::Ignored => writeln!(out, "{} is already being edited", field)?,
        EditOutcome::Reverted => {
            writeln!(
                out,
                "invalid input; {} reverted to {}",
                field,
                format_value(calc.state().value(field))
            )?;
        }
        EditOutcome::Cancelled => {
            writeln!(
                out,
                "cancelled; {} stays {}",
                field,
                format_value(calc.state().value(field))
            )?;
        }
        EditOutcome::Committed(_) | EditOutcome::Updated | EditOutcome::Unchanged => {}
    }
    Ok(())
}

/// One display line for a field, marking the derived one
pub fn field_line(state: &Measurement, variable: Variable) -> String {
    let value = format!("{} {}", format_value(state.value(variable)), variable.unit());
    let marker = if state.is_derived(variable) {
        "  (derived)"
    } else {
        ""
    };
    format!("{:<8}{}{}", format!("{}:", variable.label()), value.trim_end(), marker)
}

fn print_state<W: Write>(out: &mut W, state: &Measurement) -> Result<()> {
    let category = state.category();
    writeln!(
        out,
        "weight={} height={} bmi={} target={} category={}",
        format_value(state.weight),
        format_value(state.height),
        format_value(state.bmi),
        state.target,
        category.name()
    )?;
    Ok(())
}
