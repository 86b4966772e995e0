// ============================================================================
// Deferred Expression Tree
// Build-now, compute-later chains of additions and subtractions
// ============================================================================

use crate::interfaces::IntoOperand;
use crate::numeric::{NumberValue, NumericResult};
use crate::utils::ensure_sufficient_stack;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Operator
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Operator {
    Add,
    Subtract,
}

impl Operator {
    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
        }
    }
}

// ============================================================================
// Expression Node
// ============================================================================

/// An operand of a deferred operation: either a finished value or another
/// pending operation.
///
/// Cloning is shallow. A `Literal` shares its blocks and a `Pending` node
/// shares the whole subtree.
///
/// `Debug` is shallow: a pending operand prints its operator and depth, not
/// its subtree.
#[derive(Clone)]
pub enum Expr {
    /// Terminal, already canonical
    Literal(NumberValue),
    /// Not yet evaluated
    Pending(Arc<DeferredOperation>),
}

impl Expr {
    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self, Expr::Pending(_))
    }

    /// The value, if this node is already a literal.
    pub fn as_literal(&self) -> Option<&NumberValue> {
        match self {
            Expr::Literal(value) => Some(value),
            Expr::Pending(_) => None,
        }
    }

    /// Nesting depth of pending nodes; a literal has depth 0.
    pub fn depth(&self) -> usize {
        depth_of(self, &mut HashMap::new())
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Expr::Pending(operation) => f
                .debug_struct("Pending")
                .field("operator", &operation.operator)
                .field("depth", &operation.depth())
                .finish_non_exhaustive(),
        }
    }
}

impl From<NumberValue> for Expr {
    fn from(value: NumberValue) -> Self {
        Expr::Literal(value)
    }
}

impl From<DeferredOperation> for Expr {
    fn from(operation: DeferredOperation) -> Self {
        Expr::Pending(Arc::new(operation))
    }
}

impl From<Arc<DeferredOperation>> for Expr {
    fn from(operation: Arc<DeferredOperation>) -> Self {
        Expr::Pending(operation)
    }
}

// ============================================================================
// Deferred Operation
// ============================================================================

/// An unevaluated `left ± right`.
///
/// Created by `plus`/`minus`; nothing is computed until `calculate()`.
/// Operands are shared, never copied or mutated, so one subtree may appear
/// in many chains and be evaluated from many threads.
///
/// # Example
/// ```
/// use blockdec::prelude::*;
///
/// let total = NumberValue::parse("7.86")
///     .unwrap()
///     .minus(2.4)
///     .unwrap()
///     .plus("0.54")
///     .unwrap();
/// assert_eq!(total.depth(), 2);
///
/// let value = total.calculate().unwrap();
/// assert_eq!(value, NumberValue::from(6));
/// ```
#[derive(Clone)]
pub struct DeferredOperation {
    operator: Operator,
    left: Expr,
    right: Expr,
}

impl fmt::Debug for DeferredOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredOperation")
            .field("operator", &self.operator)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish()
    }
}

impl DeferredOperation {
    /// Record `left operator right`.
    ///
    /// # Errors
    /// `InvalidOperand` if either operand cannot be coerced, including a
    /// missing (`None`) operand. The error surfaces here, never later in
    /// `calculate()`.
    pub fn new(
        operator: Operator,
        left: impl IntoOperand,
        right: impl IntoOperand,
    ) -> NumericResult<Self> {
        Ok(Self {
            operator,
            left: left.into_operand()?,
            right: right.into_operand()?,
        })
    }

    #[inline]
    pub fn operator(&self) -> Operator {
        self.operator
    }

    #[inline]
    pub fn left(&self) -> &Expr {
        &self.left
    }

    #[inline]
    pub fn right(&self) -> &Expr {
        &self.right
    }

    /// Nesting depth of pending nodes, counting this one.
    pub fn depth(&self) -> usize {
        let mut memo = HashMap::new();
        1 + depth_of(&self.left, &mut memo).max(depth_of(&self.right, &mut memo))
    }
}

/// Depth with per-node memoization, so shared subtrees are measured once.
fn depth_of(expr: &Expr, memo: &mut HashMap<*const DeferredOperation, usize>) -> usize {
    match expr {
        Expr::Literal(_) => 0,
        Expr::Pending(op) => {
            let key = Arc::as_ptr(op);
            if let Some(&depth) = memo.get(&key) {
                return depth;
            }
            let depth = ensure_sufficient_stack(|| {
                1 + depth_of(&op.left, memo).max(depth_of(&op.right, memo))
            });
            memo.insert(key, depth);
            depth
        }
    }
}

impl Drop for DeferredOperation {
    /// Unlinks uniquely owned descendants one at a time so that dropping a
    /// chain of any length runs in constant stack.
    fn drop(&mut self) {
        let mut stack = Vec::new();
        detach_pending(&mut self.left, &mut stack);
        detach_pending(&mut self.right, &mut stack);

        while let Some(node) = stack.pop() {
            // Shared nodes stay alive with their other owners
            if let Ok(mut node) = Arc::try_unwrap(node) {
                detach_pending(&mut node.left, &mut stack);
                detach_pending(&mut node.right, &mut stack);
            }
        }
    }
}

fn detach_pending(slot: &mut Expr, stack: &mut Vec<Arc<DeferredOperation>>) {
    if slot.is_pending() {
        if let Expr::Pending(node) = std::mem::replace(slot, Expr::Literal(NumberValue::zero())) {
            stack.push(node);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
