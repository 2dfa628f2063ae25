//! End-to-end pipelines exercising the whole surface together.

use fluentic::error::FluentError;
use fluentic::value::{ModuleRegistry, NativeFunction, Value};
use fluentic::{args, each, template, wrap};
use rstest::rstest;

#[rstest]
fn match_shout_and_sort_in_one_expression() -> Result<(), FluentError> {
    let result = wrap("bazfoobar")
        .find_all("ba[rz]")?
        .map(each().method().named("upper").args(vec![])?)?
        .sorted()?
        .join("-")?;
    assert_eq!(result.unwrap(), Value::text("BAR-BAZ"));
    Ok(())
}

#[rstest]
fn curried_module_functions_drive_a_map() -> Result<(), FluentError> {
    let registry = ModuleRegistry::new();
    registry
        .register("math")
        .function("scale", |arguments| match arguments.positional() {
            [Value::Int(factor), Value::Int(number)] => Ok(Some(Value::Int(factor * number))),
            received => Err(FluentError::InsufficientArguments {
                required: 2,
                received: received.len(),
            }),
        })
        .install();

    // Fix the factor, leave the number open.
    let triple = registry
        .lib()
        .attr("math")?
        .attr("scale")?
        .curry(template![3, __])?;

    let scaled = wrap(Value::list([Value::Int(1), Value::Int(2)])).map(triple)?;
    assert_eq!(
        scaled.unwrap(),
        Value::list([Value::Int(3), Value::Int(6)])
    );
    Ok(())
}

#[rstest]
fn cascaded_mutation_feeds_the_next_stage() -> Result<(), FluentError> {
    let report = wrap(Value::list([Value::Int(3), Value::Int(1)]))
        .attr("push")?
        .call(args![2])?
        .this()
        .attr("sort")?
        .call(args![])?
        .this()
        .join(" < ")?;
    assert_eq!(report.unwrap(), Value::text("1 < 2 < 3"));
    Ok(())
}

#[rstest]
fn composed_callables_flow_through_filter_and_fold() -> Result<(), FluentError> {
    let double = NativeFunction::unary("double", |value| match value {
        Value::Int(number) => Ok(Value::Int(number * 2)),
        other => Ok(other),
    });

    // double, then test the doubled value.
    let doubled_above_four = wrap(double).compose(each().gt(4))?;

    let kept = wrap(Value::list([Value::Int(1), Value::Int(2), Value::Int(3)]))
        .filter(&doubled_above_four)?;
    assert_eq!(
        kept.unwrap(),
        Value::list([Value::Int(3)])
    );
    Ok(())
}

#[rstest]
fn grouped_pipelines_stay_wrapped_until_the_end() -> Result<(), FluentError> {
    let summary = wrap(Value::list([
        Value::Int(1),
        Value::Int(2),
        Value::Int(3),
        Value::Int(4),
    ]))
    .grouped(2)?
    .map(each().method().named("len").args(vec![])?)?
    .sum()?;
    assert_eq!(summary.unwrap(), Value::Int(4));
    Ok(())
}
