// Example casting the fields of a delimited row to a typed schema

use castparse::{parse_bool, parse_decimal, parse_float, parse_int, ParseError, ParseStatus};

fn main() -> Result<(), ParseError> {
    let row = b"42| 19.995 |true|  -3.5e2|99999999999";
    let fields: Vec<&[u8]> = row.split(|&b| b == b'|').collect();
    println!("Input: {}", String::from_utf8_lossy(row));

    let id = parse_int::<i32>(fields[0]).into_result()?;
    println!("id (i32): {id}");

    // DECIMAL(6, 2): 19.995 has one fractional digit too many and rounds.
    let price = parse_decimal::<i64>(fields[1], 6, 2, true);
    println!(
        "price (decimal(6, 2)): {} [{:?}]",
        price.value.display(2),
        price.status
    );
    let price = price.into_lenient_result()?;
    println!("price accepted as {}", price.display(2));

    let active = parse_bool(fields[2]).into_result()?;
    println!("active (bool): {active}");

    let delta = parse_float::<f64>(fields[3]).into_result()?;
    println!("delta (f64): {delta}");

    let counter = parse_int::<i32>(fields[4]);
    match counter.status {
        ParseStatus::Overflow => println!("counter (i32): saturated to {}", counter.value),
        status => println!("counter (i32): {} [{status:?}]", counter.value),
    }

    Ok(())
}
