//! Integration tests for the restaurant write and read paths.
//!
//! Real workflow handlers over in-memory adapters: round-trip fidelity,
//! ownership enforcement, the image floor, image diffing, and pagination.

use std::sync::Arc;

use dinedex::adapters::memory::{
    FixedGeocoder, InMemoryMediaStore, InMemoryRestaurantRepository,
};
use dinedex::application::restaurant::{
    CreateRestaurantCommand, CreateRestaurantHandler, DeleteRestaurantCommand,
    DeleteRestaurantHandler, GetRestaurantHandler, GetRestaurantQuery, ListRestaurantsHandler,
    ListRestaurantsQuery, RestaurantView, UpdateRestaurantCommand, UpdateRestaurantHandler,
};
use dinedex::domain::foundation::{PageRequest, UserId};
use dinedex::domain::restaurant::{RestaurantDraft, RestaurantError, RestaurantPatch};
use dinedex::ports::{ListScope, MediaStore};

struct RestaurantStack {
    geocoder: Arc<FixedGeocoder>,
    media: Arc<InMemoryMediaStore>,
    create: CreateRestaurantHandler,
    update: UpdateRestaurantHandler,
    delete: DeleteRestaurantHandler,
    get: GetRestaurantHandler,
    list: ListRestaurantsHandler,
}

fn restaurant_stack() -> RestaurantStack {
    let restaurants = Arc::new(InMemoryRestaurantRepository::new());
    let geocoder = Arc::new(FixedGeocoder::new(18.52, 73.85));
    let media = Arc::new(InMemoryMediaStore::new());

    RestaurantStack {
        geocoder: geocoder.clone(),
        media: media.clone(),
        create: CreateRestaurantHandler::new(
            restaurants.clone(),
            geocoder.clone(),
            media.clone(),
        ),
        update: UpdateRestaurantHandler::new(
            restaurants.clone(),
            geocoder.clone(),
            media.clone(),
        ),
        delete: DeleteRestaurantHandler::new(restaurants.clone(), media.clone()),
        get: GetRestaurantHandler::new(restaurants.clone(), media.clone()),
        list: ListRestaurantsHandler::new(restaurants, media),
    }
}

fn draft(name: &str) -> RestaurantDraft {
    RestaurantDraft {
        name: name.to_string(),
        categories: vec!["Indian".to_string(), "Vegan".to_string()],
        description: Some("Family-run kitchen".to_string()),
        address: "12 Gandhi Road".to_string(),
        city: "Pune".to_string(),
        pin_code: "411001".to_string(),
        coordinates: None,
        phone_number: "+919876543210".to_string(),
        website: Some("https://example.com/menu".to_string()),
        opening_time: "09:00".to_string(),
        closing_time: "22:30".to_string(),
        offers_delivery: true,
        offers_dine_in: true,
        offers_pickup: false,
    }
}

fn images(count: usize) -> Vec<Vec<u8>> {
    (0..count).map(|i| vec![i as u8; 16]).collect()
}

async fn created(stack: &RestaurantStack, owner: UserId, name: &str) -> RestaurantView {
    stack
        .create
        .handle(CreateRestaurantCommand {
            owner_id: owner,
            draft: draft(name),
            images: images(3),
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn create_then_get_round_trips_every_field() {
    let stack = restaurant_stack();
    let owner = UserId::new();
    let input = draft("Masala House");

    let view = stack
        .create
        .handle(CreateRestaurantCommand {
            owner_id: owner,
            draft: input.clone(),
            images: images(4),
        })
        .await
        .unwrap();

    let fetched = stack
        .get
        .handle(GetRestaurantQuery {
            restaurant_id: view.restaurant.id,
        })
        .await
        .unwrap();

    let r = &fetched.restaurant;
    assert_eq!(r.name, input.name);
    assert_eq!(r.categories, input.categories);
    assert_eq!(r.description, input.description);
    assert_eq!(r.address, input.address);
    assert_eq!(r.city, input.city);
    assert_eq!(r.pin_code, input.pin_code);
    assert_eq!(r.phone_number, input.phone_number);
    assert_eq!(r.website, input.website);
    assert_eq!(r.opening_time, input.opening_time);
    assert_eq!(r.closing_time, input.closing_time);
    assert_eq!(r.offers_delivery, input.offers_delivery);
    assert_eq!(r.offers_dine_in, input.offers_dine_in);
    assert_eq!(r.offers_pickup, input.offers_pickup);
    assert_eq!(r.owner_id, owner);
    // One stored object per uploaded file, rehydrated to signed URLs.
    assert_eq!(r.images.len(), 4);
    assert_eq!(fetched.image_urls.len(), 4);
    assert_eq!(stack.media.stored_keys().len(), 4);
}

#[tokio::test]
async fn non_owners_can_neither_update_nor_delete() {
    let stack = restaurant_stack();
    let owner = UserId::new();
    let stranger = UserId::new();
    let view = created(&stack, owner, "Masala House").await;

    let update = stack
        .update
        .handle(UpdateRestaurantCommand {
            restaurant_id: view.restaurant.id,
            owner_id: stranger,
            patch: RestaurantPatch {
                name: Some("Hijacked".to_string()),
                ..Default::default()
            },
            new_images: Vec::new(),
            images_to_keep: None,
            images_to_remove: None,
        })
        .await;
    assert_eq!(update.unwrap_err(), RestaurantError::Forbidden);

    let delete = stack
        .delete
        .handle(DeleteRestaurantCommand {
            restaurant_id: view.restaurant.id,
            owner_id: stranger,
        })
        .await;
    assert_eq!(delete.unwrap_err(), RestaurantError::Forbidden);

    // Still there, untouched.
    let fetched = stack
        .get
        .handle(GetRestaurantQuery {
            restaurant_id: view.restaurant.id,
        })
        .await
        .unwrap();
    assert_eq!(fetched.restaurant.name, "Masala House");
}

#[tokio::test]
async fn image_floor_holds_for_create_and_update() {
    let stack = restaurant_stack();
    let owner = UserId::new();

    let too_few = stack
        .create
        .handle(CreateRestaurantCommand {
            owner_id: owner,
            draft: draft("Sparse"),
            images: images(2),
        })
        .await;
    assert_eq!(
        too_few.unwrap_err(),
        RestaurantError::InsufficientImages { provided: 2 }
    );

    // An update that would shrink the gallery below three fails too.
    let view = created(&stack, owner, "Well Stocked").await;
    let keep_one = stack.media.signed_url(&view.restaurant.images[0]).await.unwrap();
    let shrink = stack
        .update
        .handle(UpdateRestaurantCommand {
            restaurant_id: view.restaurant.id,
            owner_id: owner,
            patch: RestaurantPatch::default(),
            new_images: images(1),
            images_to_keep: Some(vec![keep_one]),
            images_to_remove: None,
        })
        .await;
    assert_eq!(
        shrink.unwrap_err(),
        RestaurantError::InsufficientImages { provided: 2 }
    );
}

#[tokio::test]
async fn update_diffs_the_image_set() {
    let stack = restaurant_stack();
    let owner = UserId::new();
    let view = created(&stack, owner, "Masala House").await;
    let original_keys = view.restaurant.images.clone();

    let keep_urls = vec![
        stack.media.signed_url(&original_keys[0]).await.unwrap(),
        stack.media.signed_url(&original_keys[1]).await.unwrap(),
    ];
    let remove_url = stack.media.signed_url(&original_keys[2]).await.unwrap();

    let updated = stack
        .update
        .handle(UpdateRestaurantCommand {
            restaurant_id: view.restaurant.id,
            owner_id: owner,
            patch: RestaurantPatch::default(),
            new_images: images(2),
            images_to_keep: Some(keep_urls),
            images_to_remove: Some(vec![remove_url]),
        })
        .await
        .unwrap();

    assert_eq!(updated.restaurant.images.len(), 4);
    assert_eq!(&updated.restaurant.images[..2], &original_keys[..2]);
    assert!(!updated.restaurant.images.contains(&original_keys[2]));
    assert!(stack.media.deleted_keys().contains(&original_keys[2]));
}

#[tokio::test]
async fn description_only_update_geocodes_nothing_and_needs_no_images() {
    let stack = restaurant_stack();
    let owner = UserId::new();
    let view = created(&stack, owner, "Masala House").await;
    assert_eq!(stack.geocoder.call_count(), 1);

    let updated = stack
        .update
        .handle(UpdateRestaurantCommand {
            restaurant_id: view.restaurant.id,
            owner_id: owner,
            patch: RestaurantPatch {
                description: Some("Now with rooftop seating".to_string()),
                ..Default::default()
            },
            new_images: Vec::new(),
            images_to_keep: None,
            images_to_remove: None,
        })
        .await
        .unwrap();

    // Geocoder untouched since create; gallery and coordinates unchanged.
    assert_eq!(stack.geocoder.call_count(), 1);
    assert_eq!(updated.restaurant.images, view.restaurant.images);
    assert_eq!(updated.restaurant.coordinates, view.restaurant.coordinates);
    assert!(view.restaurant.updated_at <= updated.restaurant.updated_at);
}

#[tokio::test]
async fn delete_removes_record_and_cascades_to_images() {
    let stack = restaurant_stack();
    let owner = UserId::new();
    let view = created(&stack, owner, "Ephemeral").await;

    stack
        .delete
        .handle(DeleteRestaurantCommand {
            restaurant_id: view.restaurant.id,
            owner_id: owner,
        })
        .await
        .unwrap();

    let gone = stack
        .get
        .handle(GetRestaurantQuery {
            restaurant_id: view.restaurant.id,
        })
        .await;
    assert!(matches!(gone, Err(RestaurantError::NotFound(_))));
    assert_eq!(stack.media.deleted_keys().len(), 3);
}

#[tokio::test]
async fn pagination_is_deterministic_over_25_listings() {
    let stack = restaurant_stack();
    let owner = UserId::new();
    for i in 0..25 {
        created(&stack, owner, &format!("Place {:02}", i)).await;
    }

    let page_two = stack
        .list
        .handle(ListRestaurantsQuery {
            scope: ListScope::Public,
            page: PageRequest::new(Some(2), Some(10)),
            search: None,
        })
        .await
        .unwrap();

    assert_eq!(page_two.items.len(), 10);
    assert_eq!(page_two.pagination.total, 25);
    assert_eq!(page_two.pagination.total_pages, 3);

    let last_page = stack
        .list
        .handle(ListRestaurantsQuery {
            scope: ListScope::Public,
            page: PageRequest::new(Some(3), Some(10)),
            search: None,
        })
        .await
        .unwrap();
    assert_eq!(last_page.items.len(), 5);
}

#[tokio::test]
async fn search_filters_the_public_listing() {
    let stack = restaurant_stack();
    let owner = UserId::new();
    created(&stack, owner, "Biryani Palace").await;
    created(&stack, owner, "Noodle Bar").await;

    let hits = stack
        .list
        .handle(ListRestaurantsQuery {
            scope: ListScope::Public,
            page: PageRequest::default(),
            search: Some("biryani".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(hits.items.len(), 1);
    assert_eq!(hits.items[0].restaurant.name, "Biryani Palace");
}
