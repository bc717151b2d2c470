use protocol_errors::{append, flatten, http, prefix, AggregateError, Error, HttpStatus};

struct SignupForm<'a> {
    email: &'a str,
    name: &'a str,
    age: u32,
}

/// Collect every field problem instead of stopping at the first one.
fn validate(form: &SignupForm<'_>) -> Option<Error> {
    let mut problems = AggregateError::new();

    if !form.email.contains('@') {
        problems.push(http::unprocessable_entity(format!("email {:?} is malformed", form.email)));
    }
    if form.name.trim().is_empty() {
        problems.push(http::bad_request("name is empty"));
    }
    if form.age < 13 {
        problems.push(Error::plain("age is below the minimum"));
    }

    if problems.is_empty() {
        None
    } else {
        Some(prefix(Error::from(problems), "signup:"))
    }
}

fn main() {
    println!("--- Aggregate Errors Example ---\n");

    let form = SignupForm { email: "ada.example.com", name: " ", age: 9 };
    let Some(err) = validate(&form) else {
        println!("form is valid");
        return;
    };

    // Members keep their own statuses; the aggregate answers with the first one
    print!("{}", err);
    println!("aggregate HTTP status: {}\n", err.status_http());
    if let Error::Aggregate(agg) = &err {
        for member in agg.iter() {
            println!("   {:<45} -> {}", member.to_string(), member.status_http());
        }
    }

    // append: a tagged head re-tags every library member with its own status
    let batch = append(
        Some(http::conflict("order 17 already submitted")),
        [Error::plain("order 18 already submitted"), Error::canceled()],
    );
    println!("\nappend with a 409 head:");
    for member in batch.iter() {
        println!("   {:<45} -> {}", member.to_string(), member.status_http());
    }

    // Nesting is collapsed by flatten, leaf order is kept
    let nested = append(Some(Error::from(batch)), [err]);
    let flat = flatten(Error::from(nested));
    println!("\nflattened:\n{}", flat);
    assert_eq!(flat.status_http(), HttpStatus::CONFLICT);
}
