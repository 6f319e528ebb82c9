use crate::{expr::Expr, stmt::Stmt};

const INDENT: &str = "    ";

/// Renders statement trees as indented pseudo-source.
pub struct Printer;

impl Printer {
    pub fn print_program(&self, statements: &[Stmt]) -> String {
        let mut out = String::new();
        self.write_block(&mut out, statements, 0);
        out
    }

    pub fn print_stmt(&self, stmt: &Stmt) -> String {
        let mut out = String::new();
        self.write_stmt(&mut out, stmt, 0);
        out
    }

    pub fn print_expr(&self, expr: &Expr) -> String {
        match expr {
            Expr::Literal(n) => n.to_string(),

            Expr::Variable(name) => name.clone(),
        }
    }

    fn write_block(&self, out: &mut String, statements: &[Stmt], depth: usize) {
        for stmt in statements {
            self.write_stmt(out, stmt, depth);
        }
    }

    fn write_stmt(&self, out: &mut String, stmt: &Stmt, depth: usize) {
        let indent = INDENT.repeat(depth);
        match stmt {
            Stmt::Assign(name, expr) => {
                out.push_str(&format!("{}{} = {}\n", indent, name, self.print_expr(expr)));
            }

            Stmt::Print(expr) => {
                out.push_str(&format!("{}print({})\n", indent, self.print_expr(expr)));
            }

            Stmt::Call(name) => out.push_str(&format!("{}{}()\n", indent, name)),

            Stmt::Def(name, body) => {
                out.push_str(&format!("{}def {}():\n", indent, name));
                if body.is_empty() {
                    out.push_str(&format!("{}{}pass\n", indent, INDENT));
                } else {
                    self.write_block(out, body, depth + 1);
                }
            }
        }
    }
}
