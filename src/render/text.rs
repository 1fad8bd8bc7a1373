use unicode_width::UnicodeWidthStr;

use crate::model::{DueStatus, Task, Theme};
use crate::render::{Renderer, View};

/// Width of the widest priority badge (`MEDIUM`)
const BADGE_WIDTH: usize = 6;

/// Plain-text renderer. Each render replaces the previous frame.
#[derive(Debug, Clone, Default)]
pub struct TextRenderer {
    frame: Vec<String>,
    theme: Theme,
    renders: usize,
}

impl TextRenderer {
    pub fn new() -> Self {
        TextRenderer::default()
    }

    /// Lines of the most recent frame
    pub fn lines(&self) -> &[String] {
        &self.frame
    }

    /// The most recent frame as one string, without a trailing newline
    pub fn output(&self) -> String {
        self.frame.join("\n")
    }

    /// Theme most recently applied
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// How many frames have been drawn
    pub fn renders(&self) -> usize {
        self.renders
    }
}

impl Renderer for TextRenderer {
    fn render(&mut self, view: &View<'_>) {
        self.frame = format_view(view);
        self.renders += 1;
    }

    fn apply_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }
}

/// Format a whole view: task lines (or an empty-state message) and a footer
pub fn format_view(view: &View<'_>) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(message) = view.empty_message() {
        lines.push(message);
    } else {
        let id_width = column_width(view.tasks.iter().map(|t| t.id.as_str()));
        let text_width = column_width(view.tasks.iter().map(|t| t.text.as_str()));
        for task in &view.tasks {
            lines.push(format_task_line(
                task,
                id_width,
                text_width,
                view.due_status(task),
            ));
        }
    }

    lines.push(String::new());
    lines.push(format_footer(view));
    lines
}

/// Format a single task as a one-line summary
pub fn format_task_line(
    task: &Task,
    id_width: usize,
    text_width: usize,
    due: Option<DueStatus>,
) -> String {
    let check = if task.completed { 'x' } else { ' ' };
    let mut line = format!(
        "[{}] {}  {}  {}",
        check,
        pad(task.id.as_str(), id_width),
        pad(&task.text, text_width),
        pad(task.priority.badge(), BADGE_WIDTH),
    );
    if let Some(due) = due {
        line.push_str("  ");
        line.push_str(&due.to_string());
    }
    line.truncate(line.trim_end().len());
    line
}

fn format_footer(view: &View<'_>) -> String {
    let plural = if view.remaining == 1 { "" } else { "s" };
    let mut footer = format!("{} item{} left", view.remaining, plural);
    if view.has_completed {
        footer.push_str(" (clear completed available)");
    }
    footer
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>) -> usize {
    values.map(UnicodeWidthStr::width).max().unwrap_or(0)
}

/// Right-pad by display width, so wide characters line up
fn pad(s: &str, width: usize) -> String {
    let w = s.width();
    if w >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Filter, Priority, TaskId};
    use chrono::NaiveDate;
    use insta::assert_snapshot;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn sample_tasks() -> Vec<Task> {
        let mut milk = Task::new(TaskId::from("1"), "buy milk".into(), Default::default())
            .with_priority(Priority::High);
        milk.completed = true;
        vec![
            milk,
            Task::new(TaskId::from("12"), "walk dog".into(), Default::default())
                .with_due_date(Some(date(11))),
            Task::new(TaskId::from("3"), "file taxes".into(), Default::default())
                .with_priority(Priority::Low)
                .with_due_date(Some(date(1))),
        ]
    }

    fn view_of(tasks: &[Task], filter: Filter) -> View<'_> {
        View {
            tasks: tasks.iter().filter(|t| filter.matches(t)).collect(),
            filter,
            theme: Theme::Light,
            remaining: tasks.iter().filter(|t| !t.completed).count(),
            total: tasks.len(),
            has_completed: tasks.iter().any(|t| t.completed),
            today: date(10),
        }
    }

    #[test]
    fn renders_task_lines_and_footer() {
        let tasks = sample_tasks();
        let mut renderer = TextRenderer::new();
        renderer.render(&view_of(&tasks, Filter::All));
        assert_snapshot!(renderer.output(), @r"
        [x] 1   buy milk    HIGH
        [ ] 12  walk dog    MEDIUM  Due tomorrow
        [ ] 3   file taxes  LOW     Overdue by 9 days

        2 items left (clear completed available)
        ");
    }

    #[test]
    fn renders_filtered_empty_state() {
        let tasks: Vec<Task> = sample_tasks()
            .into_iter()
            .filter(|t| !t.completed)
            .collect();
        let mut renderer = TextRenderer::new();
        renderer.render(&view_of(&tasks, Filter::Completed));
        assert_eq!(
            renderer.lines(),
            &["No completed todos".to_string(), String::new(), "2 items left".to_string()]
        );
    }

    #[test]
    fn renders_empty_list() {
        let mut renderer = TextRenderer::new();
        renderer.render(&view_of(&[], Filter::Active));
        assert_eq!(renderer.lines()[0], "No todos yet. Add one above!");
        assert_eq!(renderer.lines()[2], "0 items left");
    }

    #[test]
    fn single_item_footer_is_singular() {
        let tasks = vec![Task::new(TaskId::from("a"), "x".into(), Default::default())];
        let mut renderer = TextRenderer::new();
        renderer.render(&view_of(&tasks, Filter::All));
        assert_eq!(renderer.lines().last().map(String::as_str), Some("1 item left"));
    }

    #[test]
    fn wide_characters_are_padded_by_display_width() {
        let tasks = vec![
            Task::new(TaskId::from("a"), "寿司".into(), Default::default()),
            Task::new(TaskId::from("b"), "sushi".into(), Default::default()),
        ];
        let mut renderer = TextRenderer::new();
        renderer.render(&view_of(&tasks, Filter::All));
        assert_eq!(renderer.lines()[0], "[ ] a  寿司   MEDIUM");
        assert_eq!(renderer.lines()[1], "[ ] b  sushi  MEDIUM");
    }

    #[test]
    fn each_render_replaces_the_frame() {
        let tasks = sample_tasks();
        let mut renderer = TextRenderer::new();
        renderer.render(&view_of(&tasks, Filter::All));
        renderer.render(&view_of(&tasks, Filter::Completed));
        assert_eq!(renderer.renders(), 2);
        assert_eq!(renderer.lines().len(), 3);
        assert!(renderer.lines()[0].contains("buy milk"));
    }

    #[test]
    fn apply_theme_is_recorded() {
        let mut renderer = TextRenderer::new();
        assert_eq!(renderer.theme(), Theme::Light);
        renderer.apply_theme(Theme::Dark);
        assert_eq!(renderer.theme(), Theme::Dark);
    }
}
