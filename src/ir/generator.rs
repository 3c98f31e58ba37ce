use crate::ast::{
    expressions::{BinaryOp, Expr},
    statements::{BlockStmt, ForStmt, IfStmt, Stmt, WhileStmt},
    Program,
};

use super::tac::{Instr, Operand};

/// Generates three-address code for an analyzed program.
pub fn generate(program: &Program) -> Vec<Instr> {
    let mut generator = IrGenerator::new();
    for declaration in &program.declarations {
        generator.gen_stmt(declaration);
    }
    generator.code
}

struct IrGenerator {
    code: Vec<Instr>,
    temp_count: u32,
    label_count: u32,
    /// Jump targets for the innermost loops: (continue target, break target).
    loop_stack: Vec<(String, String)>,
    synth_count: u32,
}

impl IrGenerator {
    fn new() -> IrGenerator {
        IrGenerator {
            code: vec![],
            temp_count: 0,
            label_count: 0,
            loop_stack: vec![],
            synth_count: 0,
        }
    }

    fn new_temp(&mut self) -> Operand {
        let temp = Operand::Temp(self.temp_count);
        self.temp_count += 1;
        temp
    }

    fn new_label(&mut self) -> String {
        let label = format!("L{}", self.label_count);
        self.label_count += 1;
        label
    }

    /// Synthesized variable names for loops the source never wrote.
    /// These are names rather than temporaries because they are
    /// reassigned on every iteration.
    fn new_synth(&mut self, prefix: &str) -> String {
        let name = format!("__{}{}", prefix, self.synth_count);
        self.synth_count += 1;
        name
    }

    fn emit(&mut self, instruction: Instr) {
        self.code.push(instruction);
    }

    // ========== Statements ==========

    fn gen_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VarDecl(decl) => {
                if let Some(value) = &decl.value {
                    let operand = self.gen_expr(value);
                    self.emit(Instr::Assign {
                        value: operand,
                        target: Operand::Name(decl.name.clone()),
                    });
                }
            }
            Stmt::FuncDecl(decl) => {
                self.emit(Instr::FuncBegin(decl.name.clone()));
                for parameter in &decl.parameters {
                    self.emit(Instr::Param(Operand::Name(parameter.name.clone())));
                }
                self.gen_block(&decl.body);
                self.emit(Instr::FuncEnd(decl.name.clone()));
            }
            Stmt::ChannelDecl(decl) => {
                self.emit(Instr::ChannelCreate {
                    kind: decl.kind,
                    name: decl.name.clone(),
                });
            }
            Stmt::Block(block) => self.gen_block(block),
            Stmt::If(if_stmt) => self.gen_if(if_stmt),
            Stmt::While(while_stmt) => self.gen_while(while_stmt),
            Stmt::For(for_stmt) => self.gen_for(for_stmt),
            Stmt::Return(return_stmt) => {
                let value = return_stmt.value.as_ref().map(|value| self.gen_expr(value));
                self.emit(Instr::Return(value));
            }
            Stmt::Break(_) => {
                if let Some((_, break_label)) = self.loop_stack.last().cloned() {
                    self.emit(Instr::Goto(break_label));
                }
            }
            Stmt::Continue(_) => {
                if let Some((continue_label, _)) = self.loop_stack.last().cloned() {
                    self.emit(Instr::Goto(continue_label));
                }
            }
            Stmt::Expression(expr_stmt) => {
                self.gen_expr(&expr_stmt.expression);
            }
            Stmt::Seq(seq) => {
                self.emit(Instr::SeqBegin);
                self.gen_block(&seq.body);
                self.emit(Instr::SeqEnd);
            }
            Stmt::Par(par) => {
                self.emit(Instr::ParBegin);
                for (index, stmt) in par.body.statements.iter().enumerate() {
                    self.emit(Instr::ThreadStart(index));
                    self.gen_stmt(stmt);
                    self.emit(Instr::ThreadEnd(index));
                }
                self.emit(Instr::ParEnd);
            }
        }
    }

    fn gen_block(&mut self, block: &BlockStmt) {
        for stmt in &block.statements {
            self.gen_stmt(stmt);
        }
    }

    fn gen_if(&mut self, if_stmt: &IfStmt) {
        let condition = self.gen_expr(&if_stmt.condition);

        let else_label = self.new_label();

        match &if_stmt.else_branch {
            Some(else_branch) => {
                let end_label = self.new_label();
                self.emit(Instr::IfFalse {
                    condition,
                    label: else_label.clone(),
                });
                self.gen_block(&if_stmt.then_branch);
                self.emit(Instr::Goto(end_label.clone()));
                self.emit(Instr::Label(else_label));
                self.gen_stmt(else_branch);
                self.emit(Instr::Label(end_label));
            }
            None => {
                self.emit(Instr::IfFalse {
                    condition,
                    label: else_label.clone(),
                });
                self.gen_block(&if_stmt.then_branch);
                self.emit(Instr::Label(else_label));
            }
        }
    }

    fn gen_while(&mut self, while_stmt: &WhileStmt) {
        let start_label = self.new_label();
        let end_label = self.new_label();

        self.emit(Instr::Label(start_label.clone()));
        let condition = self.gen_expr(&while_stmt.condition);
        self.emit(Instr::IfFalse {
            condition,
            label: end_label.clone(),
        });

        self.loop_stack
            .push((start_label.clone(), end_label.clone()));
        self.gen_block(&while_stmt.body);
        self.loop_stack.pop();

        self.emit(Instr::Goto(start_label));
        self.emit(Instr::Label(end_label));
    }

    /// Lowers `for cursor in xs { ... }` to an index-driven while loop:
    /// the iterable and a cursor index are captured in synthesized
    /// names, and each iteration loads `cursor` with an INDEX
    /// instruction. `continue` jumps to the increment, not to the
    /// condition.
    fn gen_for(&mut self, for_stmt: &ForStmt) {
        let iterable = self.gen_expr(&for_stmt.iterable);
        let iter_name = self.new_synth("iter");
        let index_name = self.new_synth("idx");

        self.emit(Instr::Assign {
            value: iterable,
            target: Operand::Name(iter_name.clone()),
        });
        self.emit(Instr::Assign {
            value: Operand::Number(String::from("0")),
            target: Operand::Name(index_name.clone()),
        });

        let start_label = self.new_label();
        let continue_label = self.new_label();
        let end_label = self.new_label();

        self.emit(Instr::Label(start_label.clone()));

        self.emit(Instr::Param(Operand::Name(iter_name.clone())));
        let length = self.new_temp();
        self.emit(Instr::Call {
            name: String::from("len"),
            argc: 1,
            target: length.clone(),
        });

        let condition = self.new_temp();
        self.emit(Instr::Binary {
            op: BinaryOp::Less,
            left: Operand::Name(index_name.clone()),
            right: length,
            target: condition.clone(),
        });
        self.emit(Instr::IfFalse {
            condition,
            label: end_label.clone(),
        });

        self.emit(Instr::Index {
            object: Operand::Name(iter_name),
            index: Operand::Name(index_name.clone()),
            target: Operand::Name(for_stmt.cursor.clone()),
        });

        self.loop_stack
            .push((continue_label.clone(), end_label.clone()));
        self.gen_block(&for_stmt.body);
        self.loop_stack.pop();

        self.emit(Instr::Label(continue_label));
        let incremented = self.new_temp();
        self.emit(Instr::Binary {
            op: BinaryOp::Add,
            left: Operand::Name(index_name.clone()),
            right: Operand::Number(String::from("1")),
            target: incremented.clone(),
        });
        self.emit(Instr::Assign {
            value: incremented,
            target: Operand::Name(index_name),
        });
        self.emit(Instr::Goto(start_label));
        self.emit(Instr::Label(end_label));
    }

    // ========== Expressions ==========

    fn gen_expr(&mut self, expr: &Expr) -> Operand {
        match expr {
            Expr::Assignment(assignment) => {
                let value = self.gen_expr(&assignment.value);
                self.emit(Instr::Assign {
                    value,
                    target: Operand::Name(assignment.name.clone()),
                });
                Operand::Name(assignment.name.clone())
            }
            Expr::Binary(binary) => {
                let left = self.gen_expr(&binary.left);
                let right = self.gen_expr(&binary.right);
                let target = self.new_temp();
                self.emit(Instr::Binary {
                    op: binary.operator,
                    left,
                    right,
                    target: target.clone(),
                });
                target
            }
            Expr::Unary(unary) => {
                let operand = self.gen_expr(&unary.operand);
                let target = self.new_temp();
                self.emit(Instr::Unary {
                    op: unary.operator,
                    operand,
                    target: target.clone(),
                });
                target
            }
            Expr::Call(call) => {
                for argument in &call.arguments {
                    let operand = self.gen_expr(argument);
                    self.emit(Instr::Param(operand));
                }
                let target = self.new_temp();
                self.emit(Instr::Call {
                    name: call.name.clone(),
                    argc: call.arguments.len(),
                    target: target.clone(),
                });
                target
            }
            Expr::MethodCall(call) => {
                let object = self.gen_expr(&call.object);
                for argument in &call.arguments {
                    let operand = self.gen_expr(argument);
                    self.emit(Instr::Param(operand));
                }
                let target = self.new_temp();
                self.emit(Instr::MethodCall {
                    object,
                    method: call.method.clone(),
                    argc: call.arguments.len(),
                    target: target.clone(),
                });
                target
            }
            Expr::Index(index) => {
                let object = self.gen_expr(&index.object);
                let index_operand = self.gen_expr(&index.index);
                let target = self.new_temp();
                self.emit(Instr::Index {
                    object,
                    index: index_operand,
                    target: target.clone(),
                });
                target
            }
            Expr::Variable(variable) => Operand::Name(variable.name.clone()),
            Expr::Number(number) => Operand::Number(number.value.clone()),
            Expr::String(string) => Operand::Str(string.value.clone()),
            Expr::Bool(boolean) => Operand::Bool(boolean.value),
            // Aggregate values have no run-time representation at this
            // level yet. They lower to a zeroed temporary so every
            // temporary still has a defining instruction.
            Expr::Slice(_) | Expr::List(_) | Expr::Dict(_) | Expr::ListComprehension(_) => {
                let target = self.new_temp();
                self.emit(Instr::Assign {
                    value: Operand::Number(String::from("0")),
                    target: target.clone(),
                });
                target
            }
        }
    }
}
