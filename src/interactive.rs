//! 対話モード
//!
//! 画像の選択・削除・解析をメニューから繰り返す。
//! 画面状態は `Session` がすべて持ち、ここは表示と入力だけ。

use std::path::PathBuf;

use dialoguer::{Input, Select};
use plant_doctor_common::{Completion, Session, SessionView};

use crate::client::AnalysisClient;
use crate::error::Result;
use crate::flow::{run_analysis, select_path};
use crate::report::format_report;

/// メニュー操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    /// 画像を選択（選択済みなら置き換え）
    Choose,
    /// 選択を解除
    Remove,
    /// 解析
    Analyze,
    /// 終了
    Quit,
}

impl SessionAction {
    pub fn label(&self) -> &'static str {
        match self {
            SessionAction::Choose => "Choose image",
            SessionAction::Remove => "Remove image",
            SessionAction::Analyze => "Analyze",
            SessionAction::Quit => "Quit",
        }
    }
}

/// 現在の画面状態で選べる操作
pub fn available_actions(view: &SessionView) -> Vec<SessionAction> {
    let mut actions = Vec::new();
    if view.analyze_enabled {
        actions.push(SessionAction::Analyze);
    }
    actions.push(SessionAction::Choose);
    if !view.upload_prompt_visible {
        actions.push(SessionAction::Remove);
    }
    actions.push(SessionAction::Quit);
    actions
}

fn prompt_action(actions: &[SessionAction]) -> Result<SessionAction> {
    let labels: Vec<&str> = actions.iter().map(|a| a.label()).collect();
    let index = Select::new()
        .with_prompt("What next?")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(actions[index])
}

fn prompt_path() -> Result<PathBuf> {
    let input: String = Input::new()
        .with_prompt("Image path")
        .interact_text()?;
    Ok(PathBuf::from(input.trim()))
}

fn print_status(view: &SessionView) {
    match &view.file_name {
        Some(name) => println!("\n📷 Selected: {}", name),
        None => println!("\n📷 No image selected. Choose a photo of the affected leaf."),
    }
}

/// 対話モードを実行
pub async fn run_interactive(client: &AnalysisClient) -> Result<()> {
    println!("🌱 plant-doctor - interactive session");
    println!("   service: {}", client.service_url());

    let mut session = Session::new();

    loop {
        let view = session.view();
        print_status(&view);

        match prompt_action(&available_actions(&view))? {
            SessionAction::Choose => {
                let path = prompt_path()?;
                match select_path(&mut session, &path) {
                    Ok(summary) => println!("{}", summary),
                    Err(err) => eprintln!("⚠️  {}", err),
                }
            }
            SessionAction::Remove => {
                session.remove_image();
                println!("  → removed");
            }
            SessionAction::Analyze => match run_analysis(&mut session, client).await? {
                Completion::Rendered => {
                    if let Some(result) = session.view().result {
                        println!("\n{}", format_report(&result));
                    }
                }
                Completion::Failed => {
                    if let Some(banner) = session.view().error_banner {
                        eprintln!("⚠️  {}", banner);
                    }
                }
                Completion::Discarded => {}
            },
            SessionAction::Quit => break,
        }
    }

    Ok(())
}
