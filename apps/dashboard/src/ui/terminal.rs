//! Line-oriented terminal front-end: command parsing and the event loop.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use crossbeam_channel::{Receiver, Sender};
use shared::domain::{OrderStatus, StatusCode};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::UiEvent,
    orchestration::{dispatch_backend_command, undelivered_event},
};
use crate::ui::{
    app::{Action, DashboardApp, ViewKind},
    create_order::ItemField,
    render::{help_line, render},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Action(Action),
    Help,
    Quit,
    Nothing,
}

pub fn parse_command(kind: ViewKind, line: &str) -> Result<Input, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Input::Nothing);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (line, ""),
    };
    let word = word.to_ascii_lowercase();

    match word.as_str() {
        "q" | "quit" | "exit" => return Ok(Input::Quit),
        "h" | "help" | "?" => return Ok(Input::Help),
        _ => {}
    }

    let action = match (kind, word.as_str()) {
        (ViewKind::List, "n" | "new") => Action::OpenCreate,
        (ViewKind::List, "r" | "refresh") => Action::Refresh,
        (ViewKind::List, "o" | "open" | "details") => Action::ViewDetails {
            row: parse_row(rest)?,
        },
        (ViewKind::List, "delete") => Action::DeleteOrder {
            row: parse_row(rest)?,
        },
        (ViewKind::Details, "s" | "status") => Action::SelectStatus(parse_status(rest)?),
        (ViewKind::Details, "u" | "update") => Action::CommitStatus,
        (ViewKind::Details, "reload") => Action::ReloadDetails,
        (ViewKind::Details, "c" | "close" | "back") => Action::CloseDetails,
        (ViewKind::Create, "name") => Action::SetCustomerName(rest.to_string()),
        (ViewKind::Create, "email") => Action::SetCustomerEmail(rest.to_string()),
        (ViewKind::Create, "add") => Action::AddItem,
        (ViewKind::Create, "remove" | "rm") => Action::RemoveItem {
            row: parse_row(rest)?,
        },
        (ViewKind::Create, "product") => item_update(ItemField::ProductName, rest)?,
        (ViewKind::Create, "qty" | "quantity") => item_update(ItemField::Quantity, rest)?,
        (ViewKind::Create, "price") => item_update(ItemField::UnitPrice, rest)?,
        (ViewKind::Create, "submit") => Action::SubmitOrder,
        (ViewKind::Create, "cancel") => Action::CancelCreate,
        _ => return Err(format!("Unknown command `{word}`; try: {}", help_line(kind))),
    };
    Ok(Input::Action(action))
}

fn parse_row(raw: &str) -> Result<usize, String> {
    raw.trim()
        .parse::<usize>()
        .ok()
        .filter(|row| *row > 0)
        .ok_or_else(|| format!("Expected a row number, got `{}`", raw.trim()))
}

fn parse_status(raw: &str) -> Result<StatusCode, String> {
    let raw = raw.trim();
    let status = match raw.parse::<i32>() {
        Ok(code) => OrderStatus::from_code(StatusCode(code)),
        Err(_) => OrderStatus::from_name(raw),
    };
    status.map(OrderStatus::code).ok_or_else(|| {
        let choices: Vec<String> = OrderStatus::ALL
            .into_iter()
            .map(|status| format!("{} {}", status.code(), status.label()))
            .collect();
        format!("Unknown status `{raw}`; choose one of: {}", choices.join(", "))
    })
}

fn item_update(field: ItemField, rest: &str) -> Result<Action, String> {
    let (row, value) = match rest.split_once(char::is_whitespace) {
        Some((row, value)) => (row, value.trim_start()),
        None => (rest, ""),
    };
    Ok(Action::UpdateItem {
        row: parse_row(row)?,
        field,
        value: value.to_string(),
    })
}

pub fn run(
    app: &mut DashboardApp,
    initial: Vec<BackendCommand>,
    cmd_tx: &Sender<BackendCommand>,
    ui_rx: &Receiver<UiEvent>,
    ansi: bool,
) -> Result<()> {
    dispatch_all(app, cmd_tx, initial);

    let stdin = io::stdin();
    let mut input = stdin.lock().lines();
    let mut out = io::stdout();

    loop {
        while let Ok(event) = ui_rx.try_recv() {
            let cmds = app.apply(event);
            dispatch_all(app, cmd_tx, cmds);
        }

        write!(out, "{}", render(app, ansi)).context("failed to write to terminal")?;
        out.flush().context("failed to flush terminal")?;

        if app.is_busy() {
            let event = ui_rx
                .recv()
                .context("backend worker stopped while a request was in flight")?;
            let cmds = app.apply(event);
            dispatch_all(app, cmd_tx, cmds);
            continue;
        }

        if let Some(alert) = app.blocking_alert() {
            writeln!(out, "!! {alert}\n   Press Enter to continue.")?;
            out.flush()?;
            if input.next().is_none() {
                break;
            }
            app.handle(Action::DismissAlert);
            continue;
        }

        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = input.next() else {
            break;
        };
        let line = line.context("failed to read command")?;

        app.clear_status_line();
        let kind = app.active().kind();
        match parse_command(kind, &line) {
            Ok(Input::Quit) => break,
            Ok(Input::Help) => app.set_status_line(help_line(kind)),
            Ok(Input::Nothing) => {}
            Ok(Input::Action(action)) => {
                tracing::debug!(?action, "ui action");
                let cmds = app.handle(action);
                dispatch_all(app, cmd_tx, cmds);
            }
            Err(message) => app.set_status_line(message),
        }
    }
    Ok(())
}

fn dispatch_all(
    app: &mut DashboardApp,
    cmd_tx: &Sender<BackendCommand>,
    cmds: Vec<BackendCommand>,
) {
    for cmd in cmds {
        let undelivered = cmd.clone();
        if let Err(message) = dispatch_backend_command(cmd_tx, cmd) {
            // Nothing will answer this request; fail it so the view stops waiting.
            app.apply(undelivered_event(&undelivered, message.clone()));
            app.set_status_line(message);
        }
    }
}
