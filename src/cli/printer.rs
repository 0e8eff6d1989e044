//! 结果打印器
//!
//! 提供表格和垂直格式的回路输出

use crate::algorithm::{PostmanTour, WeightedDigraph};
use colored::Colorize;
use prettytable::{format, row, Cell, Row, Table};

/// 打印模式
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PrintMode {
    /// 表格模式
    Table,
    /// 垂直模式
    Vertical,
}

/// 结果打印器
pub struct Printer {
    mode: PrintMode,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(PrintMode::Table)
    }
}

impl Printer {
    pub fn new(mode: PrintMode) -> Self {
        Self { mode }
    }

    /// 设置打印模式
    pub fn set_mode(&mut self, mode: PrintMode) {
        self.mode = mode;
    }

    /// 打印回路及代价汇总
    pub fn print_tour(&self, tour: &PostmanTour, weighted: &WeightedDigraph) -> String {
        let columns = ["Step", "Tail", "Head", "Cost"].map(String::from);
        let rows: Vec<Vec<String>> = tour
            .edges
            .iter()
            .enumerate()
            .map(|(i, edge)| {
                vec![
                    (i + 1).to_string(),
                    edge.tail().to_string(),
                    edge.head().to_string(),
                    weighted
                        .cost(edge)
                        .map(|c| c.to_string())
                        .unwrap_or_else(|| "?".to_string()),
                ]
            })
            .collect();

        if rows.is_empty() {
            return "Empty tour\n".to_string();
        }

        let output = match self.mode {
            PrintMode::Table => self.format_table(&columns, &rows),
            PrintMode::Vertical => self.format_vertical(&columns, &rows),
        };

        format!("{}\n{}\n", output, self.summary(tour))
    }

    /// 代价汇总行
    pub fn summary(&self, tour: &PostmanTour) -> String {
        format!(
            "{} {} 条边, 基础代价 {}, 重复代价 {}, 总代价 {}",
            "回路:".green().bold(),
            tour.len(),
            tour.basic_cost,
            tour.excess_cost,
            tour.total_cost.to_string().bold()
        )
    }

    /// 打印重复路径分配
    pub fn print_duplications(&self, tour: &PostmanTour) -> String {
        if tour.duplications.is_empty() {
            return format!("{}\n", "图已平衡，无需重复路径".dimmed());
        }

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["From", "To", "Count", "Path Cost"]);
        for dup in &tour.duplications {
            table.add_row(row![
                dup.from.to_string(),
                dup.to.to_string(),
                dup.count.to_string(),
                dup.path_cost.to_string()
            ]);
        }
        table.to_string()
    }

    /// 打印图统计信息
    pub fn print_stats(&self, weighted: &WeightedDigraph) -> String {
        let graph = weighted.graph();
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Property", "Value"]);
        table.add_row(row!["Node Count", graph.node_count().to_string()]);
        table.add_row(row!["Edge Count", graph.edge_count().to_string()]);
        table.add_row(row!["Default Cost", weighted.cost_model().default_cost().to_string()]);
        table.add_row(row!["Basic Cost", weighted.basic_cost().to_string()]);
        table.to_string()
    }

    /// 表格格式
    fn format_table(&self, columns: &[String], rows: &[Vec<String>]) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);

        let header: Vec<Cell> = columns.iter().map(|c| Cell::new(c)).collect();
        table.set_titles(Row::new(header));

        for row_data in rows {
            let cells: Vec<Cell> = row_data.iter().map(|v| Cell::new(v)).collect();
            table.add_row(Row::new(cells));
        }

        table.to_string()
    }

    /// 垂直格式
    fn format_vertical(&self, columns: &[String], rows: &[Vec<String>]) -> String {
        let max_col_width = columns.iter().map(|c| c.len()).max().unwrap_or(0);
        let mut output = String::new();

        for (i, row_data) in rows.iter().enumerate() {
            output.push_str(&format!(
                "*************************** {}. step ***************************\n",
                i + 1
            ));

            for (j, col) in columns.iter().enumerate() {
                let value = row_data.get(j).map(|s| s.as_str()).unwrap_or("");
                output.push_str(&format!("{:>width$}: {}\n", col, value, width = max_col_width));
            }
        }

        output
    }
}
