// ============================================================================
// Basic Usage Example
// ============================================================================

use blockdec::prelude::*;
use blockdec::utils::init_logging;

fn describe(label: &str, value: &NumberValue) {
    println!(
        "{:<28} sign={:>2} mantissa={:?} exponent={}",
        label,
        value.sign().as_i8(),
        value.mantissa(),
        value.exponent()
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(tracing::Level::DEBUG)?;

    println!("=== Block Decimal Example ===\n");

    // Parse literals into canonical form
    let price = NumberValue::parse("7.86")?;
    let fee: NumberValue = "2.4".parse()?;
    describe("7.86", &price);
    describe("2.4", &fee);

    // Nothing is computed until calculate()
    let pending = price.minus(&fee)?.plus(1000)?.minus("0.46")?;
    println!("\nBuilt a chain of depth {}", pending.depth());

    let result = pending.calculate()?;
    describe("7.86 - 2.4 + 1000 - 0.46", &result);

    // Carries and borrows across blocks
    describe("1 + 999", &NumberValue::from(1).plus(999)?.calculate()?);
    describe("1 - 1000001", &NumberValue::from(1).minus(1_000_001)?.calculate()?);
    describe("-1000 - (-1)", &NumberValue::from(-1000).minus(-1)?.calculate()?);

    // An evaluator that logs every step
    println!("\nEvaluating with step logging...");
    let evaluator = EvaluatorBuilder::untrusted_input().build_with_logging()?;
    let value = evaluator.evaluate_operation(&pending)?;
    describe("logged result", &value);

    // Bad literals are rejected where the chain is built
    match price.plus("12,5") {
        Ok(_) => println!("\nUnexpectedly accepted 12,5"),
        Err(e) => println!("\nRejected operand: {}", e),
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
