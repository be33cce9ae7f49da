//! 控制流代码生成
//!
//! Labels, guarded jumps and the `for`/`loop` ... `end` blocks.

use super::naming::{self, REAL_T};
use super::{CodegenError, UnitEmitter};
use crate::frontend::lexer::JumpKind;
use crate::frontend::parser::ast::Argument;

impl<'a> UnitEmitter<'a> {
    pub fn emit_label(
        &mut self,
        name: &str,
    ) {
        self.body.line(&format!("{}:;", name));
    }

    /// Pop the jump's operands, then `goto` when the comparison holds
    ///
    /// Two-operand jumps compare the second cell against the top one;
    /// single-operand jumps compare the top cell against zero.
    pub fn emit_jump(
        &mut self,
        kind: JumpKind,
        label: &str,
    ) {
        let target = format!("goto {};", label);
        let comparison = match kind.comparison() {
            Some(comparison) => comparison,
            None => {
                self.body.line(&target);
                return;
            }
        };

        let operands = kind.operands();
        self.underflow_guard(operands);
        self.body
            .line(&format!("__qd_stack_ptr -= {};", operands));

        let condition = if operands == 2 {
            format!(
                "__qd_stack[__qd_stack_ptr] {} __qd_stack[__qd_stack_ptr + 1]",
                comparison
            )
        } else {
            format!("__qd_stack[__qd_stack_ptr] {} 0", comparison)
        };
        self.body.open(&format!("if ({}) {{", condition));
        self.body.line(&target);
        self.body.close("}");
    }

    /// `for start step end`: counts up while `$ < end`, down while `$ > end`
    pub fn emit_for(
        &mut self,
        start: &Argument,
        step: &Argument,
        end: &Argument,
    ) -> Result<(), CodegenError> {
        // bounds see the enclosing loop's `$`
        let start = self.scalar(start)?;
        let step = self.scalar(step)?;
        let end = self.scalar(end)?;

        let iterator = self.enter_loop();
        self.body.open(&format!(
            "for ({real} {it} = {start}; ({step}) >= 0 ? {it} < ({end}) : {it} > ({end}); {it} += ({step})) {{",
            real = REAL_T,
            it = iterator,
            start = start,
            step = step,
            end = end,
        ));
        Ok(())
    }

    pub fn emit_loop(&mut self) -> Result<(), CodegenError> {
        let iterator = self.enter_loop();
        self.body.open(&format!(
            "for ({real} {it} = 0; ; {it} += 1) {{",
            real = REAL_T,
            it = iterator,
        ));
        Ok(())
    }

    pub fn emit_end(&mut self) -> Result<(), CodegenError> {
        let frame = self
            .frame
            .as_mut()
            .ok_or_else(|| CodegenError::UnbalancedEnd(String::new()))?;
        if frame.loop_depth == 0 {
            return Err(CodegenError::UnbalancedEnd(frame.qualified.clone()));
        }
        frame.loop_depth -= 1;
        self.body.close("}");
        Ok(())
    }

    /// Iteration variable of the innermost open loop
    pub fn current_iterator(&self) -> Result<String, CodegenError> {
        match self.frame.as_ref().map(|f| f.loop_depth) {
            Some(depth) if depth > 0 => Ok(naming::iterator(depth)),
            _ => Err(CodegenError::IteratorOutsideLoop),
        }
    }

    fn enter_loop(&mut self) -> String {
        let depth = match self.frame.as_mut() {
            Some(frame) => {
                frame.loop_depth += 1;
                frame.loop_depth
            }
            None => 1,
        };
        naming::iterator(depth)
    }
}
