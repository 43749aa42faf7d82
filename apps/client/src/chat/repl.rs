//! Interactive chat loop on stdin/stdout.
//!
//! Plain lines are sent as messages; lines starting with `/` are commands.

use std::io::Write;
use std::path::PathBuf;

use chrono::Utc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tracing::debug;

use crate::chat::attachments::display_name;
use crate::chat::conversation::ChatView;
use crate::chat::render::render_entry;
use crate::chat::scroll::Viewport;
use crate::display::format::relative_time;
use crate::display::{prompt, toast};
use crate::errors::AppError;
use crate::models::chat::ChatSessionDto;

const DEFAULT_SCROLL_ROWS: usize = 10;

const HELP: &str = "\
Lệnh:
  <nội dung>          gửi tin nhắn
  /retry              gửi lại tin nhắn vừa thất bại
  /attach <file>...   đính kèm file (tối đa 5)
  /detach <số>        bỏ file đính kèm
  /files              xem file đính kèm
  /new                tạo cuộc trò chuyện mới
  /sessions           danh sách cuộc trò chuyện
  /open <số|id>       mở cuộc trò chuyện
  /close              đóng cuộc trò chuyện hiện tại
  /delete [số|id]     xoá cuộc trò chuyện (mặc định: đang mở)
  /delete-all         xoá tất cả cuộc trò chuyện
  /up [n] /down [n]   cuộn
  /bottom             cuộn xuống cuối
  /quit               thoát";

#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    Empty,
    Send(String),
    Retry,
    Attach(Vec<PathBuf>),
    Detach(usize),
    Files,
    New,
    Sessions,
    Open(String),
    Close,
    Delete(Option<String>),
    DeleteAll,
    Up(usize),
    Down(usize),
    Bottom,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_command(line: &str) -> ReplCommand {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ReplCommand::Empty;
    }
    let Some(command) = trimmed.strip_prefix('/') else {
        return ReplCommand::Send(line.to_string());
    };
    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();
    let rows = || {
        args.first()
            .and_then(|n| n.parse().ok())
            .unwrap_or(DEFAULT_SCROLL_ROWS)
    };

    match name {
        "retry" => ReplCommand::Retry,
        "attach" if !args.is_empty() => {
            ReplCommand::Attach(args.iter().map(PathBuf::from).collect())
        }
        "detach" => match args.first().and_then(|n| n.parse::<usize>().ok()) {
            Some(n) if n >= 1 => ReplCommand::Detach(n - 1),
            _ => ReplCommand::Unknown(trimmed.to_string()),
        },
        "files" => ReplCommand::Files,
        "new" => ReplCommand::New,
        "sessions" => ReplCommand::Sessions,
        "open" if args.len() == 1 => ReplCommand::Open(args[0].to_string()),
        "close" => ReplCommand::Close,
        "delete" => ReplCommand::Delete(args.first().map(|s| s.to_string())),
        "delete-all" => ReplCommand::DeleteAll,
        "up" => ReplCommand::Up(rows()),
        "down" => ReplCommand::Down(rows()),
        "bottom" => ReplCommand::Bottom,
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" | "q" => ReplCommand::Quit,
        _ => ReplCommand::Unknown(trimmed.to_string()),
    }
}

/// Resolves a 1-based list position or a literal session id.
pub fn resolve_session(arg: &str, sessions: &[ChatSessionDto]) -> Option<String> {
    if let Ok(n) = arg.parse::<usize>() {
        if n >= 1 {
            if let Some(s) = sessions.get(n - 1) {
                return Some(s.session_id.clone());
            }
        }
    }
    sessions
        .iter()
        .find(|s| s.session_id == arg)
        .map(|s| s.session_id.clone())
}

pub fn session_lines(sessions: &[ChatSessionDto], active: Option<&str>) -> Vec<String> {
    let now = Utc::now();
    sessions
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let marker = if Some(s.session_id.as_str()) == active { "▶" } else { " " };
            let when = s
                .last_message_time
                .or(s.created_at)
                .map(|t| relative_time(t, now))
                .unwrap_or_default();
            format!(
                "{marker} {:>2}. {} ({} tin nhắn) {when}",
                i + 1,
                s.title(40),
                s.message_count
            )
        })
        .collect()
}

struct Repl {
    view: ChatView,
    viewport: Viewport,
    color: bool,
    /// Transcript rows already written to the terminal.
    printed: usize,
}

/// Runs the interactive loop until `/quit` or end of input.
pub async fn run(view: ChatView, color: bool) -> Result<(), AppError> {
    let mut repl = Repl {
        view,
        viewport: Viewport::new(terminal_rows()),
        color,
        printed: 0,
    };
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Trợ lý AI TalentBridge. Gõ /help để xem lệnh.");
    repl.redraw(true);

    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let command = parse_command(&line);
        debug!(?command, "repl command");
        if command == ReplCommand::Quit {
            break;
        }
        repl.viewport.resize(terminal_rows());
        repl.handle(command, &mut lines).await?;
    }
    Ok(())
}

/// Rows available for the transcript, leaving room for the prompt.
fn terminal_rows() -> usize {
    crossterm::terminal::size()
        .map(|(_, rows)| usize::from(rows).saturating_sub(2))
        .unwrap_or(22)
}

impl Repl {
    async fn handle<R>(
        &mut self,
        command: ReplCommand,
        lines: &mut Lines<R>,
    ) -> Result<(), AppError>
    where
        R: AsyncBufRead + Unpin,
    {
        match command {
            ReplCommand::Empty | ReplCommand::Quit => {}
            ReplCommand::Send(text) => {
                self.view.set_input(text);
                self.send().await;
            }
            ReplCommand::Retry => {
                if self.view.input().trim().is_empty() {
                    toast::warning("Không có tin nhắn nào để gửi lại");
                } else {
                    self.send().await;
                }
            }
            ReplCommand::Attach(paths) => {
                let outcome = self.view.attach(paths);
                if let Some(warning) = outcome.warning() {
                    toast::warning(&warning);
                }
                self.print_files();
            }
            ReplCommand::Detach(index) => match self.view.detach(index) {
                Some(path) => toast::success(&format!("Đã bỏ {}", display_name(&path))),
                None => toast::warning("Không có file ở vị trí đó"),
            },
            ReplCommand::Files => self.print_files(),
            ReplCommand::New => match self.view.new_session().await {
                Ok(_) => {
                    toast::success("Đã tạo cuộc trò chuyện mới");
                    self.redraw(true);
                }
                Err(e) => toast::api_error(&e, "Không thể tạo cuộc trò chuyện mới"),
            },
            ReplCommand::Sessions => {
                if let Err(e) = self.view.refresh_sessions().await {
                    toast::api_error(&e, "Không thể tải danh sách cuộc trò chuyện");
                }
                self.print_sessions();
            }
            ReplCommand::Open(arg) => match resolve_session(&arg, self.view.sessions()) {
                Some(id) => match self.view.select_session(&id).await {
                    Ok(()) => self.redraw(true),
                    Err(e) => toast::api_error(&e, "Không thể tải lịch sử chat"),
                },
                None => toast::warning("Không tìm thấy cuộc trò chuyện"),
            },
            ReplCommand::Close => {
                self.view.deselect();
                self.redraw(true);
            }
            ReplCommand::Delete(arg) => self.delete(arg, lines).await?,
            ReplCommand::DeleteAll => self.delete_all(lines).await?,
            ReplCommand::Up(rows) => {
                self.viewport.scroll_up(rows);
                self.print_window();
            }
            ReplCommand::Down(rows) => {
                self.viewport.scroll_down(rows);
                self.print_window();
            }
            ReplCommand::Bottom => {
                self.viewport.scroll_to_bottom();
                self.print_window();
            }
            ReplCommand::Help => println!("{HELP}"),
            ReplCommand::Unknown(raw) => {
                toast::warning(&format!("Lệnh không hợp lệ: {raw} (gõ /help)"))
            }
        }
        Ok(())
    }

    async fn send(&mut self) {
        let pending = match self.view.begin_send() {
            Ok(Some(pending)) => pending,
            Ok(None) => return,
            Err(e) => {
                toast::api_error(&e, "Đang gửi tin nhắn, vui lòng đợi");
                return;
            }
        };
        self.redraw(false);

        let had_session = self.view.active_session().is_some();
        match self.view.finish_send(pending).await {
            Ok(_) => {
                if !had_session {
                    toast::success("Đã tạo cuộc trò chuyện mới");
                }
                self.redraw(false);
            }
            Err(e) => {
                toast::api_error(&e, "Không thể gửi tin nhắn. Vui lòng thử lại");
                println!("(Tin nhắn chưa được gửi. Gõ /retry để gửi lại: {})", self.view.input());
                self.printed = self.transcript().len();
                self.viewport.on_mutation(self.printed, self.view.messages().len());
            }
        }
    }

    async fn delete<R>(&mut self, arg: Option<String>, lines: &mut Lines<R>) -> Result<(), AppError>
    where
        R: AsyncBufRead + Unpin,
    {
        let target = match arg {
            Some(arg) => resolve_session(&arg, self.view.sessions()),
            None => self.view.active_session().map(String::from),
        };
        let Some(id) = target else {
            toast::warning("Không tìm thấy cuộc trò chuyện");
            return Ok(());
        };
        if !ask(lines, "Bạn có chắc muốn xóa cuộc trò chuyện này?").await? {
            return Ok(());
        }
        let was_active = self.view.active_session() == Some(id.as_str());
        match self.view.delete_session(&id).await {
            Ok(()) => {
                toast::success("Đã xóa cuộc trò chuyện");
                if was_active {
                    self.redraw(true);
                }
            }
            Err(e) => toast::api_error(&e, "Không thể xóa cuộc trò chuyện"),
        }
        Ok(())
    }

    async fn delete_all<R>(&mut self, lines: &mut Lines<R>) -> Result<(), AppError>
    where
        R: AsyncBufRead + Unpin,
    {
        if self.view.sessions().is_empty() {
            toast::warning("Không có cuộc trò chuyện nào");
            return Ok(());
        }
        let question =
            "Bạn có chắc muốn xóa TẤT CẢ lịch sử trò chuyện? Hành động này không thể hoàn tác!";
        if !ask(lines, question).await? {
            return Ok(());
        }
        let report = self.view.delete_all_sessions().await;
        if report.is_complete() {
            toast::success("Đã xóa tất cả lịch sử trò chuyện");
        } else {
            for (id, err) in &report.failed {
                toast::api_error(err, &format!("Không thể xóa cuộc trò chuyện {id}"));
            }
            toast::warning(&format!(
                "Đã xóa {}/{} cuộc trò chuyện",
                report.deleted.len(),
                report.deleted.len() + report.failed.len()
            ));
        }
        self.redraw(true);
        Ok(())
    }

    fn transcript(&self) -> Vec<String> {
        let now = Utc::now();
        self.view
            .messages()
            .iter()
            .flat_map(|m| render_entry(m, now, self.color))
            .collect()
    }

    /// Applies the follow rule after a transcript change. A full redraw
    /// (session switch) reprints the visible window.
    fn redraw(&mut self, full: bool) {
        let transcript = self.transcript();
        if full {
            self.viewport.offset = 0;
            self.viewport.content_height = 0;
            self.printed = 0;
        }
        let followed = self
            .viewport
            .on_mutation(transcript.len(), self.view.messages().len());
        if full {
            self.print_rows(&transcript);
        } else if followed {
            for line in transcript.iter().skip(self.printed) {
                println!("{line}");
            }
        } else {
            println!("↓ Có tin nhắn mới (/bottom)");
        }
        self.printed = transcript.len();
    }

    fn print_window(&self) {
        self.print_rows(&self.transcript());
        if !self.viewport.at_bottom() {
            println!("↓ /down hoặc /bottom để xem tiếp");
        }
    }

    fn print_rows(&self, transcript: &[String]) {
        if transcript.is_empty() {
            match self.view.active_session() {
                Some(_) => println!("(Chưa có tin nhắn)"),
                None => println!("(Chưa chọn cuộc trò chuyện)"),
            }
            return;
        }
        for line in &transcript[self.viewport.visible()] {
            println!("{line}");
        }
    }

    fn print_sessions(&self) {
        let lines = session_lines(self.view.sessions(), self.view.active_session());
        if lines.is_empty() {
            println!("(Chưa có cuộc trò chuyện nào)");
        }
        for line in lines {
            println!("{line}");
        }
    }

    fn print_files(&self) {
        let paths = self.view.attachments().paths();
        if paths.is_empty() {
            println!("(Không có file đính kèm)");
        }
        for (i, path) in paths.iter().enumerate() {
            println!("  {}. {}", i + 1, display_name(path));
        }
    }
}

async fn ask<R>(lines: &mut Lines<R>, question: &str) -> Result<bool, AppError>
where
    R: AsyncBufRead + Unpin,
{
    print!("{question} [y/N] ");
    std::io::stdout().flush()?;
    let answer = lines.next_line().await?.unwrap_or_default();
    Ok(prompt::is_yes(&answer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::conversation::tests::session;

    #[test]
    fn test_plain_text_is_sent_verbatim() {
        assert_eq!(
            parse_command("  Xin chào  "),
            ReplCommand::Send("  Xin chào  ".to_string())
        );
        assert_eq!(parse_command("   "), ReplCommand::Empty);
    }

    #[test]
    fn test_commands_parse() {
        assert_eq!(
            parse_command("/attach a.pdf b.png"),
            ReplCommand::Attach(vec![PathBuf::from("a.pdf"), PathBuf::from("b.png")])
        );
        assert_eq!(parse_command("/detach 2"), ReplCommand::Detach(1));
        assert!(matches!(parse_command("/detach 0"), ReplCommand::Unknown(_)));
        assert_eq!(parse_command("/delete"), ReplCommand::Delete(None));
        assert_eq!(parse_command("/up"), ReplCommand::Up(DEFAULT_SCROLL_ROWS));
        assert_eq!(parse_command("/down 3"), ReplCommand::Down(3));
        assert_eq!(parse_command("/q"), ReplCommand::Quit);
        assert!(matches!(parse_command("/bogus"), ReplCommand::Unknown(_)));
    }

    #[test]
    fn test_resolve_session_by_position_or_id() {
        let sessions = vec![session("abc"), session("def")];
        assert_eq!(resolve_session("2", &sessions).as_deref(), Some("def"));
        assert_eq!(resolve_session("abc", &sessions).as_deref(), Some("abc"));
        assert_eq!(resolve_session("3", &sessions), None);
        assert_eq!(resolve_session("0", &sessions), None);
    }

    #[test]
    fn test_session_lines_mark_active() {
        let sessions = vec![session("abc"), session("def")];
        let lines = session_lines(&sessions, Some("def"));
        assert!(lines[0].starts_with("   1. hello abc"));
        assert!(lines[1].starts_with("▶  2. hello def"));
    }

    #[tokio::test]
    async fn test_ask_reads_next_line() {
        let input: &[u8] = b"y\nn\n";
        let mut lines = BufReader::new(input).lines();
        assert!(ask(&mut lines, "?").await.unwrap());
        assert!(!ask(&mut lines, "?").await.unwrap());
        assert!(!ask(&mut lines, "?").await.unwrap());
    }
}
