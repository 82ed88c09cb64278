use anyhow::Result;
use nnvector::specs;
use nnvector::{Harness, TestCase};
use nnvector_generator::listing::render_test_module;

#[path = "listings/floor_relaxed.rs"]
mod floor_relaxed;
#[path = "listings/mul.rs"]
mod mul;
#[path = "listings/relu_floor_chain.rs"]
mod relu_floor_chain;

struct Listing {
    name: &'static str,
    text: &'static str,
    create_case: fn() -> Result<TestCase>,
    create_dynamic: fn() -> Result<TestCase>,
    is_ignored: fn(usize) -> bool,
}

fn listings() -> Vec<Listing> {
    vec![
        Listing {
            name: "floor_relaxed",
            text: include_str!("listings/floor_relaxed.rs"),
            create_case: floor_relaxed::create_case,
            create_dynamic: floor_relaxed::create_case_dynamic_output_shape,
            is_ignored: floor_relaxed::is_ignored,
        },
        Listing {
            name: "mul",
            text: include_str!("listings/mul.rs"),
            create_case: mul::create_case,
            create_dynamic: mul::create_case_dynamic_output_shape,
            is_ignored: mul::is_ignored,
        },
        Listing {
            name: "relu_floor_chain",
            text: include_str!("listings/relu_floor_chain.rs"),
            create_case: relu_floor_chain::create_case,
            create_dynamic: relu_floor_chain::create_case_dynamic_output_shape,
            is_ignored: relu_floor_chain::is_ignored,
        },
    ]
}

#[test]
fn rendered_listings_match_checked_in_modules() -> Result<()> {
    for listing in listings() {
        let case = specs::find(listing.name)?;
        assert_eq!(render_test_module(&case)?, listing.text, "{}", listing.name);
    }
    Ok(())
}

#[test]
fn listing_modules_rebuild_catalog_cases() -> Result<()> {
    for listing in listings() {
        let case = (listing.create_case)()?;
        case.validate()?;
        assert_eq!(case, specs::find(listing.name)?, "{}", listing.name);
        assert!(!(listing.is_ignored)(0));

        let dynamic = (listing.create_dynamic)()?;
        assert_eq!(dynamic, case.dynamic_output_shape()?);
    }
    Ok(())
}

#[test]
fn listing_cases_pass_on_reference() -> Result<()> {
    for listing in listings() {
        let case = (listing.create_case)()?;
        for device in nnvector::test_targets()? {
            for report in Harness::for_device(device).run_case_variants(&case)? {
                report.into_result()?;
            }
        }
    }
    Ok(())
}
