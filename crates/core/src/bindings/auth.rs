use alloy::sol;

sol! {
    #[sol(rpc)]
    #[derive(Debug, PartialEq, Eq, Hash)]
    contract Auth {
        event OwnerUpdated(address indexed user, address indexed newOwner);
        event AuthorityUpdated(address indexed user, address indexed newAuthority);

        function owner() external view returns (address);
        function setOwner(address newOwner) external;
        function authority() external view returns (address);
        function setAuthority(address newAuthority) external;
    }
}
