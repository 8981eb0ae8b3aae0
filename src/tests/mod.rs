use fixture::Fixture;

mod session;
