use crate::infra::{
    InMemoryCraftsmanStore, InMemoryDraftStore, InMemoryLikeStore, InMemoryListingStore,
    InMemoryMediaStore, InMemoryUserDirectory, InMemoryWishlistStore,
};
use chrono::{Duration, Utc};
use clap::Args;
use homefinder::error::AppError;
use homefinder::marketplace::craftsmen::{CraftsmanService, CraftsmanSubmission};
use homefinder::marketplace::engagement::EngagementService;
use homefinder::marketplace::listings::{
    ApartmentType, AuthContext, FurnitureSubmission, ImageUpload, ListingPolicy, ListingService,
    ListingSubmission, SearchFilters, UnitType, UserId,
};
use homefinder::marketplace::moderation::{
    ModerationQueue, UserProfile, VerificationStatus,
};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print the moderation worklist as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

/// Seed an in-memory marketplace, walk one listing through the edit cycle,
/// and show what the admin worklist looks like along the way.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let listing_store = Arc::new(InMemoryListingStore::default());
    let draft_store = Arc::new(InMemoryDraftStore::default());
    let directory = Arc::new(InMemoryUserDirectory::default());

    let listings = Arc::new(ListingService::new(
        listing_store.clone(),
        draft_store.clone(),
        Arc::new(InMemoryMediaStore::default()),
        ListingPolicy::default(),
    ));
    let engagement = Arc::new(EngagementService::new(
        Arc::new(InMemoryWishlistStore::default()),
        Arc::new(InMemoryLikeStore::default()),
        listing_store.clone(),
    ));
    let craftsmen = CraftsmanService::new(Arc::new(InMemoryCraftsmanStore::default()));
    let moderation = ModerationQueue::new(directory.clone(), listing_store, draft_store);

    let seller = UserId("user-omar".to_string());
    let buyer = UserId("user-nadia".to_string());
    seed_directory(&directory);

    println!("HomeFinder marketplace demo\n");

    let now = Utc::now();
    let maadi = listings.create(
        submission(
            "Sunny three-bedroom near the Nile",
            "Maadi",
            2_500_000.0,
            ApartmentType::ForSale,
        ),
        &seller,
        now,
    )?;
    let zamalek = listings.create(
        submission(
            "Furnished studio with balcony",
            "Zamalek",
            28_000.0,
            ApartmentType::ForRent,
        ),
        &seller,
        now,
    )?;
    println!(
        "Seeded {} and {} (live until {})",
        maadi.id.0,
        zamalek.id.0,
        maadi.expiration_date.date_naive()
    );

    engagement.add_to_wishlist(&maadi.id, &buyer, now)?;
    engagement.like(&maadi.id, &buyer, now)?;
    println!(
        "Buyer engagement on {}: {} like(s), saved to 1 wishlist",
        maadi.id.0,
        engagement.like_count(&maadi.id)?
    );

    let carpenter = craftsmen.add(
        CraftsmanSubmission {
            name: "Hassan Mostafa".to_string(),
            profession: "Carpenter".to_string(),
            phone_number: "+20-100-555-0142".to_string(),
        },
        now,
    )?;
    println!(
        "Craftsman directory lists {} ({})",
        carpenter.name, carpenter.profession
    );

    let ctx = AuthContext::user(seller.clone());
    listings.request_edit(
        &maadi.id,
        submission(
            "Sunny three-bedroom, price reduced",
            "Maadi",
            2_350_000.0,
            ApartmentType::ForSale,
        ),
        &ctx,
        now + Duration::hours(2),
    )?;
    listings.request_deletion(&zamalek.id, &ctx, now + Duration::hours(3))?;

    let worklist = moderation.build()?;
    println!("\nModeration worklist ({} rows):", worklist.len());
    if args.json {
        let rendered = serde_json::to_string_pretty(&worklist)
            .map_err(|err| AppError::Io(std::io::Error::other(err)))?;
        println!("{rendered}");
    } else {
        for request in &worklist {
            let subject = request
                .listing_title
                .as_deref()
                .unwrap_or(request.full_name.as_str());
            println!("  [{}] {}", request.kind.label(), subject);
        }
    }

    let approved = listings.approve_edit(&maadi.id, now + Duration::hours(4))?;
    println!(
        "\nApproved edit: \"{}\" now priced at {:.0} EGP",
        approved.title, approved.price
    );

    let filters = SearchFilters {
        neighborhood: Some("Maadi".to_string()),
        ..SearchFilters::default()
    };
    let hits = listings.search(&filters, 1, 12, now + Duration::hours(5))?;
    println!("Search \"Maadi\" finds {} live listing(s)", hits.total);

    let swept = listings.expire_sweep(now + Duration::days(61))?;
    println!("Sweep at +61 days retires {swept} listing(s)");

    Ok(())
}

fn seed_directory(directory: &InMemoryUserDirectory) {
    directory.upsert(UserProfile {
        id: UserId("user-omar".to_string()),
        first_name: "Omar".to_string(),
        last_name: "Hassan".to_string(),
        email: "omar@example.com".to_string(),
        avatar_url: None,
        is_seller: true,
        seller_requested: false,
        verification: VerificationStatus::Verified,
    });
    directory.upsert(UserProfile {
        id: UserId("user-salma".to_string()),
        first_name: "Salma".to_string(),
        last_name: "Farouk".to_string(),
        email: "salma@example.com".to_string(),
        avatar_url: None,
        is_seller: false,
        seller_requested: true,
        verification: VerificationStatus::Pending,
    });
    directory.upsert(UserProfile {
        id: UserId("user-nadia".to_string()),
        first_name: "Nadia".to_string(),
        last_name: "Said".to_string(),
        email: "nadia@example.com".to_string(),
        avatar_url: None,
        is_seller: false,
        seller_requested: false,
        verification: VerificationStatus::Verified,
    });
}

fn submission(
    title: &str,
    neighborhood: &str,
    price: f64,
    apartment_type: ApartmentType,
) -> ListingSubmission {
    ListingSubmission {
        title: title.to_string(),
        description: Some("Renovated kitchen, balcony with river view".to_string()),
        address: "14 Corniche El Nil".to_string(),
        city: "Cairo".to_string(),
        neighborhood: neighborhood.to_string(),
        price,
        area: 140.0,
        apartment_type,
        unit_type: UnitType::Residential,
        rooms: 3,
        bathrooms: 2,
        can_be_furnished: true,
        whatsapp_number: "+20-100-555-0199".to_string(),
        images: vec![ImageUpload {
            file_name: "front.jpg".to_string(),
            bytes: vec![0x01, 0x02, 0x03],
        }],
        furniture: vec![FurnitureSubmission {
            name: "Dining table".to_string(),
            price: Some(12_000.0),
            image: None,
        }],
    }
}
