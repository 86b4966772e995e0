// ============================================================================
// Operand Interface
// Coercion into expression operands and the plus/minus/calculate contract
// ============================================================================

use crate::domain::{DeferredOperation, Expr, Operator};
use crate::engine::Evaluator;
use crate::numeric::{NumberValue, NumericError, NumericResult};
use std::sync::Arc;

/// Anything that can stand on either side of `plus`/`minus`.
///
/// Values and pending operations are shared as-is. Text literals and native
/// numbers are parsed on the spot, so a bad literal is reported when the
/// operation is built rather than when it is calculated.
pub trait IntoOperand {
    /// # Errors
    /// `InvalidOperand` when the input cannot become a value.
    fn into_operand(self) -> NumericResult<Expr>;
}

fn rejected(error: NumericError) -> NumericError {
    match error {
        NumericError::InvalidOperand { .. } => error,
        other => NumericError::InvalidOperand {
            reason: other.to_string(),
        },
    }
}

impl IntoOperand for Expr {
    fn into_operand(self) -> NumericResult<Expr> {
        Ok(self)
    }
}

impl IntoOperand for &Expr {
    fn into_operand(self) -> NumericResult<Expr> {
        Ok(self.clone())
    }
}

impl IntoOperand for NumberValue {
    fn into_operand(self) -> NumericResult<Expr> {
        Ok(Expr::Literal(self))
    }
}

impl IntoOperand for &NumberValue {
    fn into_operand(self) -> NumericResult<Expr> {
        Ok(Expr::Literal(self.clone()))
    }
}

impl IntoOperand for DeferredOperation {
    fn into_operand(self) -> NumericResult<Expr> {
        Ok(Expr::Pending(Arc::new(self)))
    }
}

impl IntoOperand for &DeferredOperation {
    fn into_operand(self) -> NumericResult<Expr> {
        Ok(Expr::Pending(Arc::new(self.clone())))
    }
}

impl IntoOperand for Arc<DeferredOperation> {
    fn into_operand(self) -> NumericResult<Expr> {
        Ok(Expr::Pending(self))
    }
}

impl IntoOperand for &str {
    fn into_operand(self) -> NumericResult<Expr> {
        NumberValue::parse(self).map(Expr::Literal).map_err(rejected)
    }
}

impl IntoOperand for String {
    fn into_operand(self) -> NumericResult<Expr> {
        self.as_str().into_operand()
    }
}

impl IntoOperand for &String {
    fn into_operand(self) -> NumericResult<Expr> {
        self.as_str().into_operand()
    }
}

impl IntoOperand for f64 {
    fn into_operand(self) -> NumericResult<Expr> {
        NumberValue::try_from(self)
            .map(Expr::Literal)
            .map_err(rejected)
    }
}

impl IntoOperand for f32 {
    fn into_operand(self) -> NumericResult<Expr> {
        NumberValue::try_from(self)
            .map(Expr::Literal)
            .map_err(rejected)
    }
}

impl IntoOperand for rust_decimal::Decimal {
    fn into_operand(self) -> NumericResult<Expr> {
        Ok(Expr::Literal(NumberValue::from(self)))
    }
}

macro_rules! impl_into_operand_for_integer {
    ($($t:ty),*) => {
        $(
            impl IntoOperand for $t {
                fn into_operand(self) -> NumericResult<Expr> {
                    Ok(Expr::Literal(NumberValue::from(self)))
                }
            }
        )*
    };
}

impl_into_operand_for_integer!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize
);

impl<T: IntoOperand> IntoOperand for Option<T> {
    fn into_operand(self) -> NumericResult<Expr> {
        match self {
            Some(operand) => operand.into_operand(),
            None => Err(NumericError::InvalidOperand {
                reason: "missing operand".to_string(),
            }),
        }
    }
}

impl<T: IntoOperand> IntoOperand for NumericResult<T> {
    /// Lets fallible builders nest: `a.plus(b.minus(c))`.
    fn into_operand(self) -> NumericResult<Expr> {
        self.map_err(rejected)?.into_operand()
    }
}

// ============================================================================
// Chaining Contract
// ============================================================================

/// `plus`, `minus` and `calculate` for values and pending operations.
///
/// `plus`/`minus` only record the operation; `calculate` forces it with a
/// default [`Evaluator`]. Use an evaluator built through
/// [`EvaluatorBuilder`](crate::engine::EvaluatorBuilder) for limits or
/// event handling.
pub trait Calculable {
    /// This receiver as an expression operand (shallow, shares data).
    fn to_expr(&self) -> Expr;

    /// Defer `self + operand`.
    fn plus(&self, operand: impl IntoOperand) -> NumericResult<DeferredOperation> {
        DeferredOperation::new(Operator::Add, self.to_expr(), operand)
    }

    /// Defer `self - operand`.
    fn minus(&self, operand: impl IntoOperand) -> NumericResult<DeferredOperation> {
        DeferredOperation::new(Operator::Subtract, self.to_expr(), operand)
    }

    /// Evaluate to a canonical value. A value calculates to itself.
    fn calculate(&self) -> NumericResult<NumberValue> {
        Evaluator::default().evaluate(&self.to_expr())
    }
}

impl Calculable for NumberValue {
    fn to_expr(&self) -> Expr {
        Expr::Literal(self.clone())
    }

    fn calculate(&self) -> NumericResult<NumberValue> {
        Ok(self.clone())
    }
}

impl Calculable for DeferredOperation {
    fn to_expr(&self) -> Expr {
        Expr::Pending(Arc::new(self.clone()))
    }
}

impl Calculable for Expr {
    fn to_expr(&self) -> Expr {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_literal_coercions() {
        let one = NumberValue::from(1);
        for operand in [
            "1".into_operand(),
            String::from("1.000").into_operand(),
            1.0f64.into_operand(),
            1u8.into_operand(),
            Decimal::ONE.into_operand(),
            Some(1i64).into_operand(),
        ] {
            assert_eq!(operand.unwrap().as_literal(), Some(&one));
        }
    }

    #[test]
    fn test_rejections_become_invalid_operand() {
        let cases = [
            "x".into_operand(),
            f64::NAN.into_operand(),
            None::<NumberValue>.into_operand(),
            Err::<NumberValue, _>(NumericError::PrecisionLoss).into_operand(),
        ];
        for case in cases {
            assert!(matches!(case, Err(NumericError::InvalidOperand { .. })));
        }
    }

    #[test]
    fn test_nested_builders() {
        let a = NumberValue::from(10);
        let op = a.minus(NumberValue::from(4).plus(3)).unwrap();
        assert!(op.right().is_pending());
        assert_eq!(op.calculate().unwrap(), NumberValue::from(3));
    }

    #[test]
    fn test_value_calculates_to_itself() {
        let v = NumberValue::parse("-0.125").unwrap();
        assert_eq!(v.calculate().unwrap(), v);
        assert_eq!(Expr::from(v.clone()).calculate().unwrap(), v);
    }
}
