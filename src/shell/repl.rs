//! Line-oriented interactive frontend.
//!
//! A stand-in for a toolkit frontend: it maps text commands onto the same
//! [`Action`] dispatch a GUI would use, and reads results back through the
//! same accessors.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::compiler::Phase;
use crate::layout::{DocumentBuffer, PanelId, RegionId};
use crate::session::KvStore;
use crate::shell::{Action, AnalysisTab, NullHost, Shell};
use crate::utils::version;

pub fn run<S: KvStore>(shell: &mut Shell<S>) -> anyhow::Result<()> {
    println!("{}", version());
    println!("{}", shell.status_line());
    println!("Type `help` for commands; `quit` saves the session and exits.");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut host = NullHost;

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "quit" | "exit") {
            break;
        }

        execute(shell, line);
        // What a toolkit frontend would do after every dispatched event.
        shell.sync_host(&mut host);
    }

    Ok(())
}

fn execute<S: KvStore>(shell: &mut Shell<S>, line: &str) {
    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return;
    };
    let rest: Vec<&str> = parts.collect();

    match command {
        "help" => print_help(),
        "status" => {
            println!("{}", shell.status_line());
            if let Some(last) = shell.console().console().last() {
                println!("{last}");
            }
        }
        "folders" => {
            if shell.folders().is_empty() {
                println!("(no root folders)");
            }
            for path in shell.folders().paths() {
                println!("{}", path.display());
            }
        }
        "tabs" => {
            for (slot, doc) in shell.docs().iter().enumerate() {
                let marker = if Some(slot) == shell.docs().active_index() {
                    "*"
                } else {
                    " "
                };
                println!("{marker} [{slot}] {}", doc.title());
            }
            println!("{} open", shell.docs().len());
        }
        "panels" => {
            for panel in shell.layout().panels() {
                println!("{} ({}): {:?}", panel.id(), panel.title(), panel.visibility());
            }
            for id in [RegionId::Top, RegionId::Main] {
                let region = shell.layout().region(id);
                println!("{:?}: {:?} {:?}", region.id(), region.slots(), region.sizes());
            }
        }
        "new" => shell.handle(Action::NewFile),
        "open" => match rest.first() {
            Some(path) => shell.handle(Action::OpenFile(PathBuf::from(path))),
            None => println!("usage: open <path>"),
        },
        "close" => match rest.first() {
            None => shell.handle(Action::CloseActiveFile),
            Some(slot) => match slot.parse() {
                Ok(slot) => shell.handle(Action::CloseSlot(slot)),
                Err(_) => println!("usage: close [slot]"),
            },
        },
        "goto" => match rest.first().and_then(|slot| slot.parse().ok()) {
            Some(slot) => shell.handle(Action::ActivateSlot(slot)),
            None => println!("usage: goto <slot>"),
        },
        "save" => shell.handle(Action::SaveFile),
        "save-as" => match rest.first() {
            Some(path) => shell.handle(Action::SaveFileAs(PathBuf::from(path))),
            None => println!("usage: save-as <path>"),
        },
        "folder" => match rest.first() {
            Some(path) => shell.handle(Action::OpenFolder(PathBuf::from(path))),
            None => println!("usage: folder <path>"),
        },
        "toggle" | "show" | "hide" | "minimize" => match rest.first().and_then(parse_panel) {
            Some(panel) => shell.handle(match command {
                "toggle" => Action::TogglePanel(panel),
                "show" => Action::ShowPanel(panel),
                "hide" => Action::ClosePanel(panel),
                _ => Action::ToggleMinimize(panel),
            }),
            None => println!("usage: {command} explorer|analysis|console"),
        },
        "resize" => resize(shell, &rest),
        "fit" => shell.handle(Action::FitLayoutToContent),
        "edit" => {
            if let Some(doc) = shell.docs_mut().active_mut() {
                doc.buffer_mut().set_text(&rest.join(" "));
            }
        }
        "cursor" => {
            let mut numbers = rest.iter().filter_map(|n| n.parse().ok());
            match (numbers.next(), numbers.next()) {
                (Some(line), Some(column)) => {
                    if let Some(doc) = shell.docs_mut().active_mut() {
                        doc.buffer_mut().set_cursor(line, column);
                    }
                }
                _ => println!("usage: cursor <line> <column>"),
            }
        }
        "run" => match rest.first().and_then(|phase| phase.parse::<Phase>().ok()) {
            Some(phase) => {
                shell.handle(Action::RunPhase(phase));
                match AnalysisTab::for_phase(phase) {
                    Some(tab) => println!("{}", shell.analysis().text(tab)),
                    None => println!("{}", shell.console().execution().text()),
                }
            }
            None => println!("usage: run {}", Phase::ALL.map(Phase::name).join("|")),
        },
        "out" => match rest.first() {
            Some(name) => match parse_tab(name) {
                Some(tab) => println!("{}", shell.analysis().text(tab)),
                None => println!("usage: out tokens|syntax|semantic|intermediate|symbols"),
            },
            None => {
                for tab in AnalysisTab::ALL {
                    println!("--- {} ---", tab.title());
                    println!("{}", shell.analysis().text(tab));
                }
            }
        },
        "console" => println!("{}", shell.console().console().text()),
        "errors" => println!("{}", shell.console().errors().text()),
        "exec" => println!("{}", shell.console().execution().text()),
        "clear" => shell.handle(Action::ClearOutputs),
        _ => println!("unknown command: {command} (try `help`)"),
    }
}

fn resize<S: KvStore>(shell: &mut Shell<S>, rest: &[&str]) {
    let region = match rest.first() {
        Some(&"top") => RegionId::Top,
        Some(&"main") => RegionId::Main,
        _ => {
            println!("usage: resize top|main <sizes...>");
            return;
        }
    };

    let sizes: Result<Vec<u32>, _> = rest[1..].iter().map(|size| size.parse()).collect();
    match sizes {
        Ok(sizes) if !sizes.is_empty() => shell.region_resized(region, &sizes),
        _ => println!("usage: resize top|main <sizes...>"),
    }
}

fn parse_panel(name: &&str) -> Option<PanelId> {
    match *name {
        "explorer" => Some(PanelId::Explorer),
        "analysis" => Some(PanelId::Analysis),
        "console" => Some(PanelId::Console),
        _ => None,
    }
}

fn parse_tab(name: &&str) -> Option<AnalysisTab> {
    match *name {
        "tokens" => Some(AnalysisTab::Tokens),
        "syntax" => Some(AnalysisTab::Syntax),
        "semantic" => Some(AnalysisTab::Semantic),
        "intermediate" => Some(AnalysisTab::Intermediate),
        "symbols" => Some(AnalysisTab::Symbols),
        _ => None,
    }
}

fn print_help() {
    println!(
        "\
files:
  new                     create an untitled document
  open <path>             open a file (reuses the tab when already open)
  close [slot]            close the active document, or a slot by index
  goto <slot>             activate a slot
  save                    save the active document
  save-as <path>          save the active document to a new path
  folder <path>           add a root folder to the explorer
  folders                 list root folders
  edit <text>             replace the active document's text
  cursor <line> <col>     move the cursor (for the status line)
  tabs                    list open documents

panels:
  toggle <panel>          hide or show a panel (explorer|analysis|console)
  hide <panel>            hide a panel
  show <panel>            show a panel
  minimize <panel>        minimize or restore a panel
  resize top|main <n...>  report a drag-resize (proportional weights)
  fit                     fit the document area to the widest open document
  panels                  print panel states and region sizes

compiler:
  run <phase>             run a compiler phase on the active document
  out <tab>               print an analysis tab
  console | errors | exec print a console surface
  clear                   clear all outputs

  status                  print the status line
  quit                    save the session and exit"
    );
}
