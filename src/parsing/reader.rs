use std::num::NonZero;

use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::char;
use nom::character::complete::digit1;
use nom::character::complete::space0;
use nom::character::complete::space1;
use nom::combinator::all_consuming;
use nom::combinator::map;
use nom::combinator::map_res;
use nom::multi::many0;
use nom::multi::many1;
use nom::multi::separated_list0;
use nom::multi::separated_list1;
use nom::sequence::delimited;
use nom::sequence::pair;
use nom::sequence::preceded;
use nom::sequence::tuple;
use nom::IResult;

use super::ParseError;
use crate::model::Instance;
use crate::model::Step;
use crate::model::User;

/// A recognised constraint line, before index validation. Indices are still 1-based here.
#[derive(Debug)]
enum Line {
    Authorisations { user: u32, steps: Vec<u32> },
    SeparationOfDuty { first: u32, second: u32 },
    BindingOfDuty { first: u32, second: u32 },
    AtMostK { k: u32, steps: Vec<u32> },
    OneTeam { steps: Vec<u32>, teams: Vec<Vec<u32>> },
}

fn number(input: &str) -> IResult<&str, u32> {
    map_res(digit1, |digits: &str| digits.parse())(input)
}

fn step_number(input: &str) -> IResult<&str, u32> {
    preceded(char('s'), number)(input)
}

fn user_number(input: &str) -> IResult<&str, u32> {
    preceded(char('u'), number)(input)
}

fn authorisations(input: &str) -> IResult<&str, Line> {
    map(
        preceded(
            pair(tag("Authorisations"), space1),
            pair(user_number, many0(preceded(space1, step_number))),
        ),
        |(user, steps)| Line::Authorisations { user, steps },
    )(input)
}

fn separation_of_duty(input: &str) -> IResult<&str, Line> {
    map(
        preceded(
            pair(tag("Separation-of-duty"), space1),
            pair(step_number, preceded(space1, step_number)),
        ),
        |(first, second)| Line::SeparationOfDuty { first, second },
    )(input)
}

fn binding_of_duty(input: &str) -> IResult<&str, Line> {
    map(
        preceded(
            pair(tag("Binding-of-duty"), space1),
            pair(step_number, preceded(space1, step_number)),
        ),
        |(first, second)| Line::BindingOfDuty { first, second },
    )(input)
}

fn at_most_k(input: &str) -> IResult<&str, Line> {
    map(
        preceded(
            pair(tag("At-most-k"), space1),
            pair(number, many1(preceded(space1, step_number))),
        ),
        |(k, steps)| Line::AtMostK { k, steps },
    )(input)
}

fn team(input: &str) -> IResult<&str, Vec<u32>> {
    delimited(char('('), separated_list0(space1, user_number), char(')'))(input)
}

fn one_team(input: &str) -> IResult<&str, Line> {
    map(
        preceded(
            pair(tag("One-team"), space1),
            pair(
                separated_list1(space1, step_number),
                many0(preceded(space1, team)),
            ),
        ),
        |(steps, teams)| Line::OneTeam { steps, teams },
    )(input)
}

fn constraint_line(input: &str) -> IResult<&str, Line> {
    alt((
        authorisations,
        separation_of_duty,
        binding_of_duty,
        at_most_k,
        one_team,
    ))(input)
}

fn header_value(
    line: Option<&str>,
    name: &'static str,
    line_number: usize,
) -> Result<u32, ParseError> {
    let content = line.unwrap_or_default().trim_end();
    let parsed: IResult<&str, u32> =
        all_consuming(preceded(tuple((tag(name), char(':'), space0)), number))(content);
    match parsed {
        Ok((_, value)) => Ok(value),
        Err(_) => Err(ParseError::MissingHeader {
            line: line_number,
            expected: name,
        }),
    }
}

fn check_step(raw: u32, step_count: usize, line: usize) -> Result<Step, ParseError> {
    if raw == 0 || raw as usize > step_count {
        return Err(ParseError::StepOutOfRange {
            line,
            index: raw,
            step_count,
        });
    }
    Ok(Step::new(raw - 1))
}

fn check_user(raw: u32, user_count: usize, line: usize) -> Result<User, ParseError> {
    if raw == 0 || raw as usize > user_count {
        return Err(ParseError::UserOutOfRange {
            line,
            index: raw,
            user_count,
        });
    }
    Ok(User::new(raw - 1))
}

fn add_line(instance: &mut Instance, line: Line, line_number: usize) -> Result<(), ParseError> {
    let step_count = instance.step_count();
    let user_count = instance.user_count();
    match line {
        Line::Authorisations { user, steps } => {
            let user = check_user(user, user_count, line_number)?;
            let steps = steps
                .into_iter()
                .map(|raw| check_step(raw, step_count, line_number))
                .collect::<Result<Vec<_>, _>>()?;
            instance.add_authorisations(user, steps);
        }
        Line::SeparationOfDuty { first, second } => {
            let first = check_step(first, step_count, line_number)?;
            let second = check_step(second, step_count, line_number)?;
            instance.add_separation_of_duty(first, second);
        }
        Line::BindingOfDuty { first, second } => {
            let first = check_step(first, step_count, line_number)?;
            let second = check_step(second, step_count, line_number)?;
            instance.add_binding_of_duty(first, second);
        }
        Line::AtMostK { k, steps } => {
            let k = NonZero::new(k).ok_or(ParseError::ZeroCardinality { line: line_number })?;
            let steps = steps
                .into_iter()
                .map(|raw| check_step(raw, step_count, line_number))
                .collect::<Result<Vec<_>, _>>()?;
            instance.add_at_most_k(k, steps);
        }
        Line::OneTeam { steps, teams } => {
            if teams.is_empty() {
                return Err(ParseError::MissingTeams { line: line_number });
            }
            if teams.iter().any(Vec::is_empty) {
                return Err(ParseError::EmptyTeam { line: line_number });
            }
            let steps = steps
                .into_iter()
                .map(|raw| check_step(raw, step_count, line_number))
                .collect::<Result<Vec<_>, _>>()?;
            let teams = teams
                .into_iter()
                .map(|team| {
                    team.into_iter()
                        .map(|raw| check_user(raw, user_count, line_number))
                        .collect::<Result<Vec<_>, _>>()
                })
                .collect::<Result<Vec<_>, _>>()?;
            instance.add_one_team(steps, teams);
        }
    }
    Ok(())
}

/// Parses an instance from its textual form.
///
/// The first three lines must be the `#Steps`, `#Users`, and `#Constraints` attributes,
/// followed by one line per constraint. A line matching none of the constraint forms is
/// rejected, as is any index outside the declared ranges. Content after the final constraint
/// line is ignored.
pub fn parse_instance(source: &str) -> Result<Instance, ParseError> {
    let mut lines = source.lines();
    let step_count = header_value(lines.next(), "#Steps", 1)?;
    let user_count = header_value(lines.next(), "#Users", 2)?;
    let constraint_count = header_value(lines.next(), "#Constraints", 3)?;

    let mut instance = Instance::new(step_count as usize, user_count as usize);

    for offset in 0..constraint_count as usize {
        let line_number = offset + 4;
        let Some(raw_line) = lines.next() else {
            return Err(ParseError::MissingConstraints {
                expected: constraint_count as usize,
                found: offset,
            });
        };
        let content = raw_line.trim_end();
        let parsed = match all_consuming(constraint_line)(content) {
            Ok((_, parsed)) => parsed,
            Err(_) => {
                return Err(ParseError::MalformedLine {
                    line: line_number,
                    content: content.to_owned(),
                })
            }
        };
        add_line(&mut instance, parsed, line_number)?;
    }

    Ok(instance)
}
